use gridcal_lib::constants::SPEED_PRECISIONS;
use gridcal_lib::metrics::Metric;
use gridcal_lib::metrics::TrialMetrics;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::random_search;
use super::Trial;
use super::TrialParams;

fn scored_trial(index: usize, single: Metric, multi: Metric) -> Trial {
    Trial {
        index,
        params: TrialParams {
            cpu_min_max: [1, 9],
            speed_precision: 5,
            cpu_speed: vec![100_000],
        },
        metrics: TrialMetrics {
            single_core: single,
            multi_core: multi,
        },
    }
}

#[test]
fn sampling_respects_the_bounds() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let params = TrialParams::sample(&mut rng, 4);
        let [lower, upper] = params.cpu_min_max;

        assert!((1..=8).contains(&lower));
        assert!((lower + 1..=9).contains(&upper));
        assert!(SPEED_PRECISIONS.contains(&params.speed_precision));
    }
}

#[test]
fn sampling_scales_one_speed_per_cpu_unit() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let params = TrialParams::sample(&mut rng, 4);
        let [lower, upper] = params.cpu_min_max;
        let scale = 10u64.pow(params.speed_precision);

        assert_eq!(params.cpu_speed.len(), 4);
        for speed in &params.cpu_speed {
            assert_eq!(speed % scale, 0);
            assert!((lower..=upper).contains(&(speed / scale)));
        }
    }
}

#[test]
fn unusable_trials_never_win() {
    let unusable = scored_trial(0, Metric::Mae(0.1), Metric::NoData);

    assert!(!unusable.improves_on(None));
    assert!(!unusable.improves_on(Some(&scored_trial(1, Metric::Mae(9.0), Metric::Mae(9.0)))));
}

#[test]
fn lower_averages_win() {
    let first = scored_trial(0, Metric::Mae(2.0), Metric::Mae(1.0));
    let better = scored_trial(1, Metric::Mae(1.0), Metric::Mae(1.0));
    let worse = scored_trial(2, Metric::Mae(3.0), Metric::Mae(2.0));

    assert!(first.improves_on(None));
    assert!(better.improves_on(Some(&first)));
    assert!(!worse.improves_on(Some(&first)));
}

#[test]
fn ties_keep_the_earlier_trial() {
    let first = scored_trial(0, Metric::Mae(2.0), Metric::Mae(1.0));
    let tied = scored_trial(1, Metric::Mae(1.0), Metric::Mae(2.0));

    assert_eq!(first.average(), tied.average());
    assert!(!tied.improves_on(Some(&first)));
}

#[cfg(unix)]
#[test]
fn search_returns_the_earliest_best_trial() {
    use indicatif::ProgressBar;

    use crate::test_utils::sample_setup;
    use crate::test_utils::FAKE_SIMULATOR;
    use crate::test_utils::REAL_FS;

    let (_dir, config) = sample_setup(FAKE_SIMULATOR);
    let mut rng = StdRng::seed_from_u64(7);
    let bar = ProgressBar::hidden();

    let best = random_search(&config, &REAL_FS, &mut rng, &bar)
        .unwrap()
        .unwrap();

    // The fake simulator scores every trial identically, so the first one
    // stays the best.
    assert_eq!(best.index, 0);
    assert_eq!(best.average(), Some(1.5));
}

#[cfg(unix)]
#[test]
fn search_survives_a_silent_simulator() {
    use indicatif::ProgressBar;

    use crate::test_utils::sample_setup;
    use crate::test_utils::REAL_FS;
    use crate::test_utils::SILENT_SIMULATOR;

    let (_dir, config) = sample_setup(SILENT_SIMULATOR);
    let mut rng = StdRng::seed_from_u64(7);
    let bar = ProgressBar::hidden();

    let best = random_search(&config, &REAL_FS, &mut rng, &bar).unwrap();

    assert!(best.is_none());
}
