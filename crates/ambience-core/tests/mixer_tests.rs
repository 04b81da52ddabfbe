// Host-side tests for the transport state machine and per-lane gain model.

use ambience_core::{visual_state, Mixer, MixerParams, Phase, Toggle, TRACKS};

fn make_mixer() -> Mixer {
    Mixer::new(TRACKS.to_vec(), MixerParams::default())
}

fn load_all(m: &mut Mixer) {
    for i in 0..m.tracks.len() {
        m.mark_loaded(i);
    }
}

#[test]
fn fresh_mixer_is_stopped_and_silent() {
    let m = make_mixer();
    assert_eq!(m.phase(), Phase::Stopped);
    assert_eq!(m.master_slider, 1.0);
    for lane in m.lanes.iter() {
        assert_eq!(lane.slider, 0.0);
        assert!(!lane.loaded);
        assert!(!lane.failed);
        assert!(!lane.source_active);
    }
}

#[test]
fn lanes_resolve_by_id_in_table_order() {
    let m = make_mixer();
    assert_eq!(m.lane_index("rain"), Some(0));
    assert_eq!(m.lane_index("wind"), Some(1));
    assert_eq!(m.lane_index("waves"), Some(2));
    assert_eq!(m.lane_index("fire"), Some(3));
    assert_eq!(m.lane_index("birds"), Some(4));
    assert_eq!(m.lane_index("thunder"), None);
}

#[test]
fn slider_moves_apply_the_waves_trim() {
    let mut m = make_mixer();
    let waves = m.lane_index("waves").unwrap();
    let rain = m.lane_index("rain").unwrap();

    let effective = m.set_lane_slider(waves, 0.5).unwrap();
    assert!((effective - 0.3).abs() < 1e-6, "waves at 0.5 should land at 0.3");

    let effective = m.set_lane_slider(rain, 0.5).unwrap();
    assert!((effective - 0.5).abs() < 1e-6, "rain carries no trim");
}

#[test]
fn slider_values_clamp_to_unit_range() {
    let mut m = make_mixer();
    let effective = m.set_lane_slider(0, 1.7).unwrap();
    assert_eq!(m.lanes[0].slider, 1.0);
    assert!((effective - 1.0).abs() < 1e-6);

    let effective = m.set_lane_slider(0, -0.4).unwrap();
    assert_eq!(m.lanes[0].slider, 0.0);
    assert_eq!(effective, 0.0);

    assert_eq!(m.set_master_slider(3.0), 1.0);
    assert_eq!(m.set_master_slider(-1.0), 0.0);
}

#[test]
fn unknown_lane_is_rejected() {
    let mut m = make_mixer();
    assert_eq!(m.set_lane_slider(99, 0.5), None);
    assert_eq!(m.effective_gain(99), 0.0);
}

#[test]
fn waves_trim_holds_across_a_slider_sweep() {
    let mut m = make_mixer();
    let waves = m.lane_index("waves").unwrap();
    for i in 0..=10 {
        let slider = i as f32 / 10.0;
        let effective = m.set_lane_slider(waves, slider).unwrap();
        assert!(
            (effective - slider * 0.6).abs() < 1e-6,
            "waves at {slider} should carry gain {}",
            slider * 0.6
        );
        assert!((m.effective_gain(waves) - effective).abs() < 1e-6);
    }
}

#[test]
fn rapid_slider_scrub_settles_on_the_final_value() {
    let mut m = make_mixer();
    let waves = m.lane_index("waves").unwrap();
    let mut last = 0.0;
    for i in 0..100 {
        let v = (i as f32 * 0.37) % 1.0;
        last = m.set_lane_slider(waves, v).unwrap();
    }
    assert!((last - m.effective_gain(waves)).abs() < 1e-6);
    assert!((m.lanes[waves].slider * 0.6 - last).abs() < 1e-6);
}

#[test]
fn toggle_from_stopped_starts_every_loaded_lane() {
    let mut m = make_mixer();
    load_all(&mut m);
    m.set_master_slider(0.8);

    match m.toggle() {
        Toggle::Start {
            lanes,
            master_target,
            fade_in_sec,
        } => {
            assert_eq!(lanes.as_slice(), &[0, 1, 2, 3, 4]);
            assert!((master_target - 0.8).abs() < 1e-6);
            assert_eq!(fade_in_sec, 1.0);
        }
        other => panic!("expected start, got {other:?}"),
    }
    assert_eq!(m.phase(), Phase::Playing);
    assert!(m.lanes.iter().all(|l| l.source_active));
}

#[test]
fn failed_lane_is_skipped_but_siblings_start() {
    let mut m = make_mixer();
    for i in 0..m.tracks.len() {
        if i == 2 {
            m.mark_failed(i);
        } else {
            m.mark_loaded(i);
        }
    }
    match m.toggle() {
        Toggle::Start { lanes, .. } => assert_eq!(lanes.as_slice(), &[0, 1, 3, 4]),
        other => panic!("expected start, got {other:?}"),
    }
    assert!(!m.lanes[2].source_active);
}

#[test]
fn nothing_loaded_still_fades_the_master_in() {
    let mut m = make_mixer();
    match m.toggle() {
        Toggle::Start {
            lanes,
            master_target,
            ..
        } => {
            assert!(lanes.is_empty());
            assert!((master_target - 1.0).abs() < 1e-6);
        }
        other => panic!("expected start, got {other:?}"),
    }
    assert_eq!(m.phase(), Phase::Playing);
}

#[test]
fn pause_fades_then_teardown_stops_and_rests_the_master() {
    let mut m = make_mixer();
    load_all(&mut m);
    m.set_master_slider(0.8);
    let _ = m.toggle();

    match m.toggle() {
        Toggle::FadeOut { fade_out_sec } => assert_eq!(fade_out_sec, 0.5),
        other => panic!("expected fade-out, got {other:?}"),
    }
    assert_eq!(m.phase(), Phase::FadingOut);
    // Sources keep running while the fade is audible.
    assert!(m.lanes.iter().all(|l| l.source_active));

    let stop = m.finish_fade_out().expect("teardown lands after a fade");
    assert!((stop.resting_master - 0.8).abs() < 1e-6);
    assert_eq!(m.phase(), Phase::Stopped);
    assert!(m.lanes.iter().all(|l| !l.source_active));
}

#[test]
fn toggle_is_ignored_while_fading_out() {
    let mut m = make_mixer();
    load_all(&mut m);
    let _ = m.toggle();
    let _ = m.toggle();
    assert_eq!(m.phase(), Phase::FadingOut);

    match m.toggle() {
        Toggle::Ignore => {}
        other => panic!("expected ignore, got {other:?}"),
    }
    assert_eq!(m.phase(), Phase::FadingOut);
    // The pending teardown still lands afterwards.
    assert!(m.finish_fade_out().is_some());
}

#[test]
fn stale_teardown_is_dropped() {
    let mut m = make_mixer();
    load_all(&mut m);
    assert!(m.finish_fade_out().is_none(), "no teardown while stopped");
    let _ = m.toggle();
    assert!(m.finish_fade_out().is_none(), "no teardown while playing");
    assert_eq!(m.phase(), Phase::Playing);
}

#[test]
fn master_moves_during_the_fade_update_the_resting_level() {
    let mut m = make_mixer();
    load_all(&mut m);
    m.set_master_slider(0.8);
    let _ = m.toggle();
    let _ = m.toggle();

    // User drags the master mid-fade; the bus should rest where they left it.
    m.set_master_slider(0.3);
    let stop = m.finish_fade_out().expect("teardown lands after a fade");
    assert!((stop.resting_master - 0.3).abs() < 1e-6);
}

#[test]
fn late_load_stays_silent_until_the_next_start() {
    let mut m = make_mixer();
    m.mark_loaded(0);

    match m.toggle() {
        Toggle::Start { lanes, .. } => assert_eq!(lanes.as_slice(), &[0]),
        other => panic!("expected start, got {other:?}"),
    }

    // A download finishes mid-session; it must wait for the next start.
    m.mark_loaded(1);
    assert!(!m.lanes[1].source_active);

    let _ = m.toggle();
    let _ = m.finish_fade_out();
    match m.toggle() {
        Toggle::Start { lanes, .. } => assert_eq!(lanes.as_slice(), &[0, 1]),
        other => panic!("expected start, got {other:?}"),
    }
}

#[test]
fn load_bookkeeping_settles_once_every_lane_reports() {
    let mut m = make_mixer();
    assert!(!m.all_loads_settled());
    for i in 0..4 {
        m.mark_loaded(i);
    }
    assert!(!m.all_loads_settled());
    m.mark_failed(4);
    assert!(m.all_loads_settled());
    assert_eq!(m.loaded_count(), 4);
    assert_eq!(m.failed_count(), 1);
}

#[test]
fn full_mix_scenario_with_trimmed_waves() {
    // Five loops ready, master pulled to 0.8, waves wide open: the waves
    // stage still sits at 0.6 while its icon reads full.
    let mut m = make_mixer();
    load_all(&mut m);
    m.set_master_slider(0.8);
    let waves = m.lane_index("waves").unwrap();
    m.set_lane_slider(waves, 1.0);

    let effective = m.effective_gain(waves);
    println!("waves slider 1.0 -> stage gain {effective}");
    assert!((effective - 0.6).abs() < 1e-6);

    let visual = visual_state(m.lanes[waves].slider);
    assert!(visual.active);
    assert!((visual.opacity.unwrap() - 1.0).abs() < 1e-6);

    match m.toggle() {
        Toggle::Start {
            lanes,
            master_target,
            ..
        } => {
            assert_eq!(lanes.len(), 5);
            assert!((master_target - 0.8).abs() < 1e-6);
        }
        other => panic!("expected start, got {other:?}"),
    }
}
