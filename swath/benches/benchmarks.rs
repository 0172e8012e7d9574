use criterion::{criterion_group, criterion_main, Criterion};
use swath::{GroundTrack, LandProduct, Orientation, PhotonProduct, Swath, TrimSpec};

/// A straight northbound pass over southern New Mexico with one
/// photon every 0.1 ms and a geolocation segment every 20 m.
fn synthetic_pass(n_photons: usize) -> (PhotonProduct, LandProduct) {
    let photons_per_segment = 140;
    let n_segments = n_photons / photons_per_segment;
    let dt = 1e-4;

    let delta_time: Vec<f64> = (0..n_photons).map(|i| 1000.0 + i as f64 * dt).collect();
    let lat: Vec<f64> = (0..n_photons).map(|i| 32.0 + i as f64 * 6.3e-8).collect();
    let segment_delta_time: Vec<f64> = (0..n_segments)
        .map(|s| delta_time[s * photons_per_segment])
        .collect();

    let photons = PhotonProduct {
        lon: vec![-106.5; n_photons],
        height: (0..n_photons).map(|i| 1200.0 + (i % 97) as f64).collect(),
        signal_conf: vec![4; n_photons],
        geoid: segment_delta_time.iter().map(|_| -21.5).collect(),
        geoid_delta_time: segment_delta_time.clone(),
        solar_elevation: segment_delta_time.iter().map(|_| 40.0).collect(),
        solar_delta_time: segment_delta_time.clone(),
        ph_index_beg: (0..n_segments)
            .map(|s| (s * photons_per_segment + 1) as i64)
            .collect(),
        segment_id: (0..n_segments).map(|s| 600_000 + s as i64).collect(),
        segment_delta_time,
        lat,
        delta_time,
    };

    // Every fourth photon of each segment classified.
    let classified: Vec<(i64, i64)> = (0..n_segments)
        .flat_map(|s| {
            (1..=photons_per_segment as i64)
                .step_by(4)
                .map(move |indx| (600_000 + s as i64, indx))
        })
        .collect();
    let n_land = n_segments / 5;
    let land = LandProduct {
        lat: (0..n_land)
            .map(|s| photons.lat[s * 5 * photons_per_segment])
            .collect(),
        lon: vec![-106.5; n_land],
        max_canopy: vec![1210.0; n_land],
        te_best_fit: vec![1201.0; n_land],
        te_median: vec![1200.5; n_land],
        delta_time: (0..n_land)
            .map(|s| photons.delta_time[s * 5 * photons_per_segment])
            .collect(),
        classed_pc_indx: classified.iter().map(|c| c.1).collect(),
        classed_pc_flag: classified.iter().map(|c| (c.1 % 4) as i8).collect(),
        ph_segment_id: classified.iter().map(|c| c.0).collect(),
    };

    (photons, land)
}

fn swath_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Swath");

    let (photons, land) = synthetic_pass(1_000_000);

    group.bench_with_input("1M photons", &(photons, land), |b, (p, l)| {
        b.iter(|| {
            Swath::builder()
                .photons(p.clone())
                .land(l.clone())
                .ground_track(GroundTrack::Gt2l)
                .orientation(Orientation::Backward)
                .trim(TrimSpec::None)
                .build()
                .unwrap()
        })
    });
}

criterion_group!(benches, swath_build);
criterion_main!(benches);
