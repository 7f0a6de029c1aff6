//! Integration tests for nobori-solver.

use glam::Vec3;
use nobori_mesh::generators::parametric_grid;
use nobori_mesh::normals::compute_vertex_normals;
use nobori_mesh::{PlaneSurface, TriangleMesh};
use nobori_solver::wind::{gust_direction, gust_strength};
use nobori_solver::{
    ClothSimulation, ClothTopology, Constraint, Particle, PinSet, SolverConfig, Wind,
};
use nobori_types::{NoboriError, ParticleId};

/// Grid whose particle positions equal their grid coordinates times `spacing`.
fn unit_grid(w: u32, h: u32, spacing: f32) -> ClothTopology {
    let (fw, fh) = (w as f32 * spacing, h as f32 * spacing);
    let surface = move |u: f32, v: f32| Vec3::new(u * fw, v * fh, 0.0);
    ClothTopology::new(w, h, spacing, 1.0, &surface).unwrap()
}

/// A small hanging plane plus its render mesh.
fn hanging_cloth(config: SolverConfig) -> (ClothSimulation, TriangleMesh) {
    let surface = PlaneSurface::for_grid(15.0, 4, 6, 1.0, 0.3);
    let topology = ClothTopology::new(4, 6, 15.0, 0.2, &surface).unwrap();
    let mesh = parametric_grid(&surface, 4, 6);
    let sim = ClothSimulation::new(topology, config).unwrap();
    (sim, mesh)
}

/// Host loop: step, write back, recompute normals.
fn run_frames(
    sim: &mut ClothSimulation,
    mesh: &mut TriangleMesh,
    frames: u32,
    mut check: impl FnMut(&ClothSimulation),
) {
    let mut normals = Vec::new();
    for frame in 0..frames {
        mesh.read_normals(&mut normals);
        let now = frame as f64 * 1000.0 / 60.0;
        sim.step(now, &mesh.indices, &normals).unwrap();
        sim.write_positions(mesh).unwrap();
        compute_vertex_normals(mesh);
        check(sim);
    }
}

fn pair(c: &Constraint) -> (u32, u32) {
    (c.a().0, c.b().0)
}

// ─── Particle Tests ───────────────────────────────────────────

#[test]
fn particle_rejects_bad_mass() {
    for mass in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let err = Particle::new(Vec3::ZERO, mass).unwrap_err();
        assert!(matches!(err, NoboriError::InvalidMass { .. }), "mass {mass}");
    }
}

#[test]
fn particle_starts_at_rest() {
    let p = Particle::new(Vec3::new(1.0, 2.0, 3.0), 0.5).unwrap();
    assert_eq!(p.position, p.previous);
    assert_eq!(p.position, p.original);
    assert_eq!(p.acceleration, Vec3::ZERO);
    assert_eq!(p.inv_mass(), 2.0);
}

#[test]
fn forces_accumulate_linearly() {
    let mut p = Particle::new(Vec3::ZERO, 2.0).unwrap();
    p.add_force(Vec3::new(2.0, 0.0, 0.0));
    p.add_force(Vec3::new(2.0, -4.0, 0.0));
    assert_eq!(p.acceleration, Vec3::new(2.0, -2.0, 0.0));
}

#[test]
fn integrate_fixed_point() {
    let mut p = Particle::new(Vec3::new(5.0, -3.0, 1.0), 1.0).unwrap();
    for _ in 0..10 {
        p.integrate(0.018 * 0.018, 0.09);
    }
    assert_eq!(p.position, Vec3::new(5.0, -3.0, 1.0));
    assert_eq!(p.previous, p.position);
}

#[test]
fn integrate_damped_verlet_step() {
    let mut p = Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
    p.previous = Vec3::ZERO;
    p.add_force(Vec3::new(0.0, -10.0, 0.0));
    p.integrate(0.01, 0.09);

    assert!((p.position.x - 1.91).abs() < 1e-6);
    assert!((p.position.y + 0.1).abs() < 1e-6);
    assert_eq!(p.previous, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(p.acceleration, Vec3::ZERO);
}

#[test]
fn restore_zeroes_implied_velocity() {
    let mut p = Particle::new(Vec3::ONE, 1.0).unwrap();
    p.position = Vec3::new(4.0, 4.0, 4.0);
    p.previous = Vec3::new(3.0, 3.0, 3.0);
    p.restore();
    assert_eq!(p.position, Vec3::ONE);
    assert_eq!(p.implied_velocity(), Vec3::ZERO);
}

// ─── Constraint Tests ─────────────────────────────────────────

#[test]
fn constraint_rejects_bad_rest_distance() {
    for rest in [0.0, -2.0, f32::NAN] {
        let err = Constraint::new(ParticleId(0), ParticleId(1), rest).unwrap_err();
        assert!(matches!(err, NoboriError::InvalidRestDistance { .. }));
    }
}

fn two_particles(a: Vec3, b: Vec3) -> Vec<Particle> {
    vec![Particle::new(a, 1.0).unwrap(), Particle::new(b, 1.0).unwrap()]
}

#[test]
fn relax_moves_toward_rest_distance() {
    let c = Constraint::new(ParticleId(0), ParticleId(1), 1.0).unwrap();

    // Stretched and compressed cases.
    for start in [3.0_f32, 0.25] {
        let mut particles = two_particles(Vec3::ZERO, Vec3::new(start, 0.0, 0.0));
        c.relax(&mut particles);
        let d = particles[0].position.distance(particles[1].position);
        let (lo, hi) = if start > 1.0 { (1.0, start) } else { (start, 1.0) };
        assert!(d >= lo - 1e-6 && d <= hi + 1e-6, "start {start}: {d}");
        assert!((d - 1.0).abs() < (start - 1.0).abs());
    }
}

#[test]
fn relax_splits_correction_evenly() {
    let c = Constraint::new(ParticleId(0), ParticleId(1), 1.0).unwrap();
    let mut particles = vec![
        Particle::new(Vec3::ZERO, 1.0).unwrap(),
        Particle::new(Vec3::new(3.0, 0.0, 0.0), 100.0).unwrap(),
    ];
    c.relax(&mut particles);
    // Correction of 2 split 1/1 despite the 100× mass difference.
    assert!((particles[0].position.x - 1.0).abs() < 1e-6);
    assert!((particles[1].position.x - 2.0).abs() < 1e-6);
}

#[test]
fn relax_skips_coincident_particles() {
    let c = Constraint::new(ParticleId(0), ParticleId(1), 1.0).unwrap();
    let at = Vec3::new(2.0, -1.0, 0.5);
    let mut particles = two_particles(at, at);
    c.relax(&mut particles);
    assert_eq!(particles[0].position, at);
    assert_eq!(particles[1].position, at);
    assert!(particles.iter().all(|p| p.position.is_finite()));
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_2x2_counts_and_pairs() {
    let topo = unit_grid(2, 2, 1.0);
    assert_eq!(topo.particle_count(), 9);
    assert_eq!(topo.constraint_count(), 2 * 3 + 2 * 3);

    let pairs: Vec<(u32, u32)> = topo.constraints().iter().map(pair).collect();
    assert_eq!(
        pairs,
        vec![
            (0, 3), (0, 1),
            (1, 4), (1, 2),
            (3, 6), (3, 4),
            (4, 7), (4, 5),
            (2, 5), (5, 8),
            (6, 7), (7, 8),
        ]
    );
    assert!(topo.constraints().iter().all(|c| c.rest_distance() == 1.0));
}

#[test]
fn topology_constraints_are_grid_adjacent() {
    let topo = unit_grid(5, 3, 1.0);
    assert_eq!(topo.constraint_count(), 5 * 4 + 3 * 6);
    for c in topo.constraints() {
        let (ua, va) = topo.coords(c.a()).unwrap();
        let (ub, vb) = topo.coords(c.b()).unwrap();
        let du = ua.abs_diff(ub);
        let dv = va.abs_diff(vb);
        assert_eq!(du + dv, 1, "{:?} -> {:?}", (ua, va), (ub, vb));
    }
}

#[test]
fn topology_samples_surface_row_major() {
    let topo = unit_grid(3, 2, 2.0);
    for v in 0..=2 {
        for u in 0..=3 {
            let id = topo.index(u, v).unwrap();
            assert_eq!(id, ParticleId(u + v * 4));
            let p = topo.particle(id).unwrap();
            let expected = Vec3::new(u as f32 * 2.0, v as f32 * 2.0, 0.0);
            assert!((p.original - expected).length() < 1e-5);
            assert_eq!(topo.coords(id).unwrap(), (u, v));
        }
    }
}

#[test]
fn topology_index_out_of_bounds() {
    let topo = unit_grid(3, 2, 1.0);
    assert!(topo.index(3, 2).is_ok());
    assert!(matches!(
        topo.index(4, 0),
        Err(NoboriError::GridOutOfBounds { u: 4, v: 0, width: 3, height: 2 })
    ));
    assert!(topo.index(0, 3).is_err());
    assert!(matches!(
        topo.particle(ParticleId(12)),
        Err(NoboriError::IndexOutOfBounds { index: 12, count: 12 })
    ));
}

#[test]
fn topology_construction_errors() {
    let surface = PlaneSurface::default();
    assert!(matches!(
        ClothTopology::new(0, 3, 1.0, 1.0, &surface),
        Err(NoboriError::InvalidConfig(_))
    ));
    assert!(matches!(
        ClothTopology::new(2, 2, 1.0, 0.0, &surface),
        Err(NoboriError::InvalidMass { .. })
    ));
    assert!(matches!(
        ClothTopology::new(2, 2, -1.0, 1.0, &surface),
        Err(NoboriError::InvalidRestDistance { .. })
    ));
}

#[test]
fn oversized_grid_rejected_before_allocation() {
    let surface = PlaneSurface::default();
    // 65536 × 65536 slots is one more row than u32 can address.
    assert!(matches!(
        ClothTopology::new(65_535, 65_536, 1.0, 1.0, &surface),
        Err(NoboriError::InvalidConfig(_))
    ));
    assert!(matches!(
        ClothTopology::new(u32::MAX, 1, 1.0, 1.0, &surface),
        Err(NoboriError::InvalidConfig(_))
    ));
    // The slot limit is checked before the rest distance.
    assert!(matches!(
        ClothTopology::new(u32::MAX, u32::MAX, -1.0, 1.0, &surface),
        Err(NoboriError::InvalidConfig(_))
    ));
}

#[test]
fn prestretched_grid_closed_form() {
    // 3×3 particles at integer coordinates, rest distance 1.
    let mut topo = unit_grid(2, 2, 1.0);
    let corner = topo.index(0, 0).unwrap();
    let above = topo.index(0, 1).unwrap();
    topo.particle_mut(corner).unwrap().position = Vec3::new(-1.0, -1.0, 0.0);

    // First constraint in creation order is (0,0)-(0,1).
    let first = topo.constraints()[0];
    assert_eq!(pair(&first), (corner.0, above.0));

    let mut particles = topo.particles().to_vec();
    first.relax(&mut particles);

    // delta = (1, 2, 0), |delta| = √5, each end moves (1 - 1/√5)/2 of delta.
    let k = (1.0 - 1.0 / 5.0_f32.sqrt()) * 0.5;
    let expected_corner = Vec3::new(-1.0 + k, -1.0 + 2.0 * k, 0.0);
    let expected_above = Vec3::new(-k, 1.0 - 2.0 * k, 0.0);
    assert!((particles[corner.index()].position - expected_corner).length() < 1e-5);
    assert!((particles[above.index()].position - expected_above).length() < 1e-5);
    let d = particles[corner.index()].position.distance(particles[above.index()].position);
    assert!((d - 1.0).abs() < 1e-5);

    // A full pass keeps the same constraint closer to rest than it started.
    let before = 5.0_f32.sqrt();
    topo.relax();
    let after = topo
        .particle(corner)
        .unwrap()
        .position
        .distance(topo.particle(above).unwrap().position);
    assert!((after - 1.0).abs() < (before - 1.0).abs());
}

#[test]
fn max_stretch_at_rest_is_one() {
    let topo = unit_grid(4, 4, 0.5);
    assert!((topo.max_stretch() - 1.0).abs() < 1e-5);
}

// ─── Pin Tests ────────────────────────────────────────────────

#[test]
fn pin_set_rejects_out_of_range() {
    assert!(matches!(
        PinSet::from_indices(&[0, 9], 9),
        Err(NoboriError::IndexOutOfBounds { index: 9, count: 9 })
    ));

    let topo = unit_grid(2, 2, 1.0);
    let mut sim = ClothSimulation::new(topo, SolverConfig::still()).unwrap();
    let foreign = PinSet::from_indices(&[20], 100).unwrap();
    assert!(sim.set_pins(foreign).is_err());
    assert!(sim.pins().is_empty());
}

#[test]
fn pin_rows_and_columns() {
    let topo = unit_grid(3, 2, 1.0);
    let row = PinSet::row(&topo, 2).unwrap();
    assert_eq!(row.ids(), &[ParticleId(8), ParticleId(9), ParticleId(10), ParticleId(11)]);
    let column = PinSet::column(&topo, 3).unwrap();
    assert_eq!(column.ids(), &[ParticleId(3), ParticleId(7), ParticleId(11)]);
    assert!(PinSet::row(&topo, 3).is_err());
}

#[test]
fn pinned_particles_exact_every_frame() {
    let (sim, mut mesh) = hanging_cloth(SolverConfig::default());
    let top = PinSet::row(sim.topology(), 6).unwrap();
    let mut sim = sim.with_pins(top.clone()).unwrap();

    run_frames(&mut sim, &mut mesh, 120, |sim| {
        for &id in top.ids() {
            let p = sim.topology().particle(id).unwrap();
            assert_eq!(p.position, p.original);
            assert_eq!(p.previous, p.original);
        }
    });

    // The free part of the cloth did move.
    let bottom = sim.topology().particle(ParticleId(0)).unwrap();
    assert!(bottom.position.distance(bottom.original) > 1.0);
}

// ─── Frame Step Tests ─────────────────────────────────────────

#[test]
fn floor_is_never_penetrated() {
    let config = SolverConfig {
        floor_y: -30.0,
        ..SolverConfig::default()
    };
    let (mut sim, mut mesh) = hanging_cloth(config);
    let mut contacts = 0;
    let mut normals = Vec::new();
    for frame in 0..300 {
        mesh.read_normals(&mut normals);
        let report = sim.step(frame as f64 * 16.0, &mesh.indices, &normals).unwrap();
        contacts += report.floor_contacts;
        sim.write_positions(&mut mesh).unwrap();
        compute_vertex_normals(&mut mesh);
        assert!(sim.positions().all(|p| p.y >= -30.0), "frame {frame}");
    }
    assert!(contacts > 0);
    assert_eq!(sim.frame(), 300);
}

#[test]
fn gravity_displaces_centroid_by_closed_form() {
    // Relaxation moves both ends of a constraint by equal and opposite
    // amounts, so the mean position follows gravity alone.
    let config = SolverConfig {
        gravity: 100.0,
        wind: Wind::Calm,
        ..SolverConfig::default()
    };
    let (mut sim, mesh) = hanging_cloth(config);
    let mut normals = Vec::new();
    mesh.read_normals(&mut normals);

    let n = sim.topology().particle_count() as f64;
    let before = sim.positions().map(|p| p.y as f64).sum::<f64>() / n;
    sim.step(0.0, &mesh.indices, &normals).unwrap();
    let after = sim.positions().map(|p| p.y as f64).sum::<f64>() / n;

    let expected = -100.0 * 0.018_f64 * 0.018;
    assert!((after - before - expected).abs() < 1e-4, "{}", after - before);
}

#[test]
fn wind_pushes_once_per_incident_triangle() {
    let config = SolverConfig::still().with_wind(Wind::Steady { force: [0.0, 0.0, 10.0] });
    let surface = PlaneSurface::default();
    let topology = ClothTopology::new(1, 1, 1.0, 1.0, &surface).unwrap();
    let mesh = parametric_grid(&surface, 1, 1);
    let mut sim = ClothSimulation::new(topology, config).unwrap();

    let normals = vec![Vec3::Z; 4];
    sim.step(0.0, &mesh.indices, &normals).unwrap();

    // 2 triangles × 3 vertices, each pushed by 10 along +Z.
    let total_z: f32 = sim.positions().map(|p| p.z).sum();
    let expected = 6.0 * 10.0 * 0.018 * 0.018;
    assert!((total_z - expected).abs() < 1e-5, "{total_z}");
}

#[test]
fn zero_normals_receive_no_wind() {
    let config = SolverConfig::still().with_wind(Wind::Steady { force: [0.0, 0.0, 10.0] });
    let surface = PlaneSurface::default();
    let topology = ClothTopology::new(1, 1, 1.0, 1.0, &surface).unwrap();
    let mut sim = ClothSimulation::new(topology, config).unwrap();

    let normals = vec![Vec3::ZERO; 4];
    sim.step(0.0, &[0, 1, 2], &normals).unwrap();
    assert!(sim.positions().all(|p| p.z == 0.0));
}

#[test]
fn shape_mismatch_leaves_state_untouched() {
    let (mut sim, mesh) = hanging_cloth(SolverConfig::default());
    let before: Vec<Vec3> = sim.positions().collect();
    let mut normals = Vec::new();
    mesh.read_normals(&mut normals);

    let short = &normals[..normals.len() - 1];
    assert!(matches!(
        sim.step(0.0, &mesh.indices, short),
        Err(NoboriError::ShapeMismatch(_))
    ));

    let ragged = &mesh.indices[..mesh.indices.len() - 1];
    assert!(matches!(
        sim.step(0.0, ragged, &normals),
        Err(NoboriError::ShapeMismatch(_))
    ));

    let n = sim.topology().particle_count() as u32;
    assert!(matches!(
        sim.step(0.0, &[0, 1, n], &normals),
        Err(NoboriError::IndexOutOfBounds { .. })
    ));

    let after: Vec<Vec3> = sim.positions().collect();
    assert_eq!(before, after);
    assert_eq!(sim.frame(), 0);
}

#[test]
fn write_positions_checks_vertex_count() {
    let (sim, _) = hanging_cloth(SolverConfig::default());
    let mut other = parametric_grid(&PlaneSurface::default(), 2, 2);
    assert!(matches!(
        sim.write_positions(&mut other),
        Err(NoboriError::ShapeMismatch(_))
    ));
}

#[test]
fn identical_runs_are_deterministic() {
    let run = || {
        let (sim, mut mesh) = hanging_cloth(SolverConfig::default());
        let pins = PinSet::row(sim.topology(), 6).unwrap();
        let mut sim = sim.with_pins(pins).unwrap();
        run_frames(&mut sim, &mut mesh, 60, |_| {});
        sim.positions().collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn more_passes_reduce_stretch() {
    // Free 4×1 strip laid out at twice its rest length, no external forces.
    let stretch = |passes: u32| {
        let surface = |u: f32, v: f32| Vec3::new(u * 8.0, v * 2.0, 0.0);
        let topology = ClothTopology::new(4, 1, 1.0, 1.0, &surface).unwrap();
        let config = SolverConfig::still().with_relaxation_passes(passes);
        let mut sim = ClothSimulation::new(topology, config).unwrap();
        let normals = vec![Vec3::ZERO; sim.topology().particle_count()];
        sim.step(0.0, &[], &normals).unwrap();
        sim.topology().max_stretch()
    };
    let single = stretch(1);
    let many = stretch(8);
    assert!(single > 1.0);
    assert!(many < single, "single {single}, many {many}");
}

// ─── Wind Tests ───────────────────────────────────────────────

#[test]
fn gust_formula_at_origin() {
    assert!((gust_strength(0.0) - 60.0).abs() < 1e-5);
    assert!((gust_direction(0.0) - Vec3::Y).length() < 1e-6);
    assert!((Wind::Gusting.force_at(0.0) - Vec3::new(0.0, 60.0, 0.0)).length() < 1e-4);
}

#[test]
fn gust_strength_bounds_and_unit_direction() {
    for i in 0..200 {
        let now = i as f64 * 173.0;
        let s = gust_strength(now);
        assert!((20.0..=60.0).contains(&s), "{s}");
        assert!((gust_direction(now).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn calm_and_steady_wind() {
    assert_eq!(Wind::Calm.force_at(1234.0), Vec3::ZERO);
    let steady = Wind::Steady { force: [1.0, 2.0, 3.0] };
    assert_eq!(steady.force_at(0.0), steady.force_at(99_999.0));
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_matches_reference_cloth() {
    let config = SolverConfig::default();
    assert_eq!(config.relaxation_passes, 1);
    assert!((config.damping - 0.09).abs() < 1e-7);
    assert_eq!(config.floor_y, -250.0);
    assert!((config.dt_squared() - 0.018 * 0.018).abs() < 1e-9);
    assert!(config.validate().is_ok());
}

#[test]
fn config_validation() {
    let bad = [
        SolverConfig { timestep: 0.0, ..Default::default() },
        SolverConfig { damping: 1.5, ..Default::default() },
        SolverConfig { relaxation_passes: 0, ..Default::default() },
        SolverConfig { gravity: f32::NAN, ..Default::default() },
        SolverConfig { floor_y: f32::NEG_INFINITY, ..Default::default() },
    ];
    for config in bad {
        assert!(config.validate().is_err(), "{config:?}");
        let topo = unit_grid(1, 1, 1.0);
        assert!(ClothSimulation::new(topo, config).is_err());
    }
}

#[test]
fn config_from_partial_toml() {
    let config: SolverConfig = toml::from_str(
        r#"
        relaxation_passes = 3
        gravity = 981.0
        wind = "calm"
        "#,
    )
    .unwrap();
    assert_eq!(config.relaxation_passes, 3);
    assert_eq!(config.gravity, 981.0);
    assert_eq!(config.wind, Wind::Calm);
    assert_eq!(config.timestep, SolverConfig::default().timestep);

    let steady: SolverConfig =
        toml::from_str(r#"wind = { steady = { force = [1.0, 0.0, 0.0] } }"#).unwrap();
    assert_eq!(steady.wind, Wind::Steady { force: [1.0, 0.0, 0.0] });
}
