use core::f64::consts::PI;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use peq_biquad::coeffs::matched;
use peq_biquad::coeffs::orfanidis::{self, PeakParameters};
use peq_biquad::frequency::{clamp_frequency, to_radians_per_sample};
use peq_biquad::sample::db_to_gain;
use peq_biquad::{
    Biquad, Coefficients, FilterKind, FilterStage, FloatSample, MatchedBiquadF64, OrfanidisPeakF32,
    OrfanidisPeakF64, Parameters, ProcessSpec, Topology,
};

fn sample_rate() -> impl Strategy<Value = f64> {
    prop_oneof![Just(44100.0), Just(48000.0), Just(96000.0)]
}

fn signal(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0..1.0_f64, len)
}

fn peak_design<X>(gain_db: f64, hz: f64, q: f64, sample_rate: f64) -> Coefficients<X>
where
    X: FloatSample,
{
    let w0 = to_radians_per_sample(X::from_f64(hz), X::from_f64(sample_rate));
    orfanidis::design(&PeakParameters::new(X::from_f64(gain_db), w0, X::from_f64(q))).coeffs
}

fn run<X>(coeffs: Coefficients<X>, topology: Topology, input: &[X]) -> Vec<X>
where
    X: FloatSample,
{
    let mut bq = Biquad::new(1);
    bq.set_topology(topology);
    bq.set_coefficients(coeffs);
    input.iter().map(|x| bq.process_sample(0, *x)).collect()
}

proptest! {
    #[test]
    fn flat_settings_pass_signal_through(
        hz in 20.0..20000.0_f64,
        q in 0.1..10.0_f64,
        sr in sample_rate(),
        topology in prop::sample::select(Topology::ALL.to_vec()),
        input in signal(64),
    ) {
        let params = Parameters::default()
            .with_frequency(hz)
            .with_resonance(q)
            .with_topology(topology);

        let mut peak = OrfanidisPeakF64::with_parameters(&params);
        peak.prepare(&ProcessSpec::new(sr, 1).unwrap());
        prop_assert_eq!(peak.coefficients(), Coefficients::identity());

        let mut matched = MatchedBiquadF64::with_parameters(&params);
        matched.prepare(&ProcessSpec::new(sr, 1).unwrap());

        let mut a = vec![input.clone()];
        let mut b = vec![input.clone()];
        peak.process_in_place(&mut a, false);
        matched.process_in_place(&mut b, false);

        prop_assert_eq!(&a[0], &input);
        for (y, x) in b[0].iter().zip(input.iter()) {
            assert_abs_diff_eq!(*y, *x, epsilon = 1e-7);
        }
    }

    #[test]
    fn topologies_agree_f64(
        gain_db in -18.0..18.0_f64,
        hz in 50.0..15000.0_f64,
        q in 0.5..10.0_f64,
        sr in sample_rate(),
        input in signal(256),
    ) {
        let coeffs = peak_design::<f64>(gain_db, hz, q, sr);
        let reference = run(coeffs, Topology::DirectFormI, &input);

        for topology in &Topology::ALL[1..] {
            let out = run(coeffs, *topology, &input);
            for (a, b) in reference.iter().zip(out.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn topologies_agree_f32(
        gain_db in -18.0..18.0_f64,
        hz in 200.0..15000.0_f64,
        q in 0.5..4.0_f64,
        sr in prop_oneof![Just(44100.0), Just(48000.0)],
        input in signal(256),
    ) {
        let coeffs = peak_design::<f32>(gain_db, hz, q, sr);
        let input: Vec<f32> = input.iter().map(|x| *x as f32).collect();
        let reference = run(coeffs, Topology::DirectFormI, &input);

        for topology in &Topology::ALL[1..] {
            let out = run(coeffs, *topology, &input);
            for (a, b) in reference.iter().zip(out.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn peak_matches_reference_gains(
        gain_db in -24.0..24.0_f64,
        hz in 20.0..16000.0_f64,
        q in 0.5..10.0_f64,
        sr in sample_rate(),
    ) {
        let mut eq = OrfanidisPeakF64::new();
        eq.prepare(&ProcessSpec::new(sr, 1).unwrap());
        eq.set_frequency(hz);
        eq.set_gain(gain_db);
        eq.set_resonance(q);

        let c = eq.coefficients();
        prop_assert!(c.is_stable());
        assert_abs_diff_eq!(c.response(0.0).0, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c.response(PI).0, eq.nyquist_gain(), epsilon = 1e-9);
        assert_abs_diff_eq!(c.magnitude_at(hz, sr), db_to_gain(gain_db), epsilon = 1e-8);
    }

    #[test]
    fn matched_shapes_hit_their_targets(
        hz in 20.0..16000.0_f64,
        q in 0.3..10.0_f64,
        gain_db in -24.0..24.0_f64,
    ) {
        let sr = 48000.0;

        let hp = matched::design(FilterKind::HighPass, hz, sr, 0.0, q);
        prop_assert!(hp.is_stable());
        assert_abs_diff_eq!(hp.response(0.0).0, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hp.response(PI).0, 1.0, epsilon = 1e-9);

        let bp = matched::design(FilterKind::BandPass, hz, sr, 0.0, q);
        prop_assert!(bp.is_stable());
        assert_abs_diff_eq!(bp.magnitude_at(hz, sr), 1.0, epsilon = 1e-9);

        let peak = matched::design(FilterKind::PeakEq, hz, sr, gain_db, q);
        prop_assert!(peak.is_stable());
        assert_abs_diff_eq!(peak.magnitude_at(hz, sr), db_to_gain(gain_db), epsilon = 1e-8);
    }

    #[test]
    fn bypass_is_idempotent(
        gain_db in -18.0..18.0_f64,
        hz in 20.0..16000.0_f64,
        warmup in signal(32),
        input in signal(64),
    ) {
        let mut eq = OrfanidisPeakF64::new();
        eq.prepare(&ProcessSpec::new(48000.0, 1).unwrap());
        eq.set_frequency(hz);
        eq.set_gain(gain_db);
        eq.process_in_place(&mut [warmup], false);

        let state = eq.engine().state().clone();
        let mut output = vec![vec![0.0; input.len()]];
        eq.process(&[input.clone()], &mut output, true);
        prop_assert_eq!(&output[0], &input);

        let mut in_place = vec![input.clone()];
        eq.process_in_place(&mut in_place, true);
        prop_assert_eq!(&in_place[0], &input);
        prop_assert_eq!(eq.engine().state(), &state);
    }

    #[test]
    fn clamped_frequency_stays_in_band(hz in prop::num::f64::ANY, sr in sample_rate()) {
        let clamped = clamp_frequency(hz, sr);
        prop_assert!(clamped >= sr / 24576.0);
        prop_assert!(clamped <= sr / 2.125);
        if hz >= sr / 24576.0 && hz <= sr / 2.125 {
            prop_assert_eq!(clamped, hz);
        }
    }

    #[test]
    fn channels_are_independent(
        gain_db in -18.0..18.0_f64,
        hz in 20.0..16000.0_f64,
        q in 0.5..20.0_f64,
        topology in prop::sample::select(Topology::ALL.to_vec()),
    ) {
        let params = Parameters::default()
            .with_frequency(hz)
            .with_gain(gain_db)
            .with_resonance(q)
            .with_topology(topology);

        let mut stereo = OrfanidisPeakF32::with_parameters(&params);
        stereo.prepare(&ProcessSpec::new(44100.0, 2).unwrap());
        let mut mono = OrfanidisPeakF32::with_parameters(&params);
        mono.prepare(&ProcessSpec::new(44100.0, 1).unwrap());

        let mut impulse = vec![0.0_f32; 16];
        impulse[0] = 1.0;
        let mut block = vec![vec![0.0_f32; 16], impulse.clone()];
        stereo.process_in_place(&mut block, false);

        let mut expected = vec![impulse];
        mono.process_in_place(&mut expected, false);

        prop_assert!(block[0].iter().all(|y| *y == 0.0));
        prop_assert_eq!(&block[1], &expected[0]);
    }
}
