//! [`DistanceDriver`]: per-source orchestration of grid, search, and output.

use indexmap::IndexMap;
use log::warn;
use smallvec::SmallVec;
use xwalk_core::{AtomId, AtomList, Point};
use xwalk_grid::{GridParams, LocalGridSpec, OccupancyGrid};
use xwalk_search::{Path, PathSearch, SearchError};

use crate::cancel::CancelToken;
use crate::config::XwalkConfig;
use crate::error::DriverError;
use crate::selector::enumerate_pairs;

/// Number of samples taken along a candidate straight-line sweep when
/// deciding whether Euclidean distance already equals SASD. Coarser than
/// the grid itself would be unsound; this oversamples relative to
/// `grid_cell_size` by construction (see
/// [`DistanceDriver::straight_line_is_clear`]).
const SWEEP_SAMPLES_PER_CELL: f64 = 2.0;

/// One emitted `(source, target, euclidean, sasd)` record.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRecord {
    /// Sequential index of this record within the run's output.
    pub index: usize,
    /// Source atom.
    pub source: AtomId,
    /// Target atom.
    pub target: AtomId,
    /// Source atom descriptor (`residueName-residueNumber-chain-atomName`).
    pub source_descriptor: String,
    /// Target atom descriptor.
    pub target_descriptor: String,
    /// Euclidean distance, Å. `None` only when the pair could not be
    /// measured at all (an aborting error — in practice this never happens
    /// for a successfully enumerated pair, since both atoms are known-valid
    /// by the time pairs are enumerated).
    pub euclidean_distance: Option<f64>,
    /// SASD, Å. `None` if unreachable within bound, or if a Geometric /
    /// Consistency error occurred for this specific pair.
    pub sasd: Option<f64>,
}

impl DistanceRecord {
    /// Render this record's fields as tab-delimited output columns
    /// (excluding the input filename, which the caller supplies since the
    /// engine itself is filename-agnostic).
    pub fn to_tsv_fields(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.source_descriptor.clone(),
            self.target_descriptor.clone(),
            format_distance(self.euclidean_distance),
            format_distance(self.sasd),
        ]
    }
}

fn format_distance(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

/// Orchestrates pair enumeration, grid construction, and bounded search for
/// one complete engine run.
pub struct DistanceDriver<'a> {
    atoms: &'a AtomList,
    config: XwalkConfig,
}

impl<'a> DistanceDriver<'a> {
    /// Build a driver over `atoms` with a validated `config`.
    pub fn new(atoms: &'a AtomList, config: XwalkConfig) -> Result<Self, DriverError> {
        config.validate()?;
        Ok(Self { atoms, config })
    }

    fn grid_params(&self) -> GridParams {
        GridParams {
            cell_size: self.config.grid_cell_size,
            solvent_radius: self.config.solvent_radius,
            clearance_radius: self.config.clearance_radius,
        }
    }

    fn bounding_dimension(&self) -> f64 {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (_, atom) in self.atoms.iter() {
            let p = atom.position();
            min = min.min(&p);
            max = max.max(&p);
        }
        let dx = max.x - min.x;
        let dy = max.y - min.y;
        let dz = max.z - min.z;
        dx.max(dy).max(dz)
    }

    /// `true` if the straight-line segment from `a` to `b` passes only
    /// through walkable cells — used to short-circuit the bounded search
    /// for pairs already known to equal their Euclidean distance in SASD.
    fn straight_line_is_clear(grid: &OccupancyGrid, a: Point, b: Point, cell_size: f64) -> bool {
        let length = a.distance_to(&b);
        if length == 0.0 {
            return true;
        }
        let steps = ((length / cell_size) * SWEEP_SAMPLES_PER_CELL).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let sample = Point::new(
                a.x + (b.x - a.x) * t,
                a.y + (b.y - a.y) * t,
                a.z + (b.z - a.z) * t,
            );
            match grid.world_to_index(&sample) {
                Some(coord) => {
                    if grid.is_occupied(coord) || grid.is_clearance_blocked(coord) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Run the full engine: enumerate pairs, build grid(s), search, and
    /// produce one [`DistanceRecord`] per pair. Groups candidates by source
    /// atom and rebuilds a local grid per source when the structure's
    /// bounding box exceeds `MAX_PROTEIN_DIMENSION`.
    pub fn run(&self) -> Result<Vec<DistanceRecord>, DriverError> {
        let pairs = enumerate_pairs(self.atoms, &self.config.pair_spec);

        let mut groups: IndexMap<AtomId, Vec<AtomId>> = IndexMap::new();
        for (source, target) in pairs {
            groups.entry(source).or_default().push(target);
        }

        let use_local = self
            .config
            .needs_local_grid(self.bounding_dimension());

        let mut records = Vec::new();
        let mut index = 0usize;

        if use_local {
            for (&source, targets) in &groups {
                self.run_source_local(source, targets, &mut records, &mut index)?;
            }
        } else {
            let mut grid = OccupancyGrid::build_full(self.atoms, self.grid_params())
                .map_err(DriverError::Grid)?;
            let mut search = PathSearch::new(&grid);
            for (&source, targets) in &groups {
                self.run_source_full(&mut grid, &mut search, source, targets, &mut records, &mut index);
            }
        }

        Ok(records)
    }

    /// Run the engine across `worker_count` threads, one group of
    /// (source, targets) pairs per worker.
    ///
    /// In full-grid mode each worker clones the base grid so it can release
    /// and restore atoms freely without synchronizing with the others; in
    /// local-grid mode each source already rebuilds its own grid, so the
    /// per-worker split is free. `cancel` is checked between sources — a
    /// cancelled run returns whatever records were already produced, with
    /// `index` renumbered sequentially over the partial output.
    pub fn run_parallel(
        &self,
        worker_count: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<DistanceRecord>, DriverError> {
        let worker_count = worker_count.max(1);
        let pairs = enumerate_pairs(self.atoms, &self.config.pair_spec);

        let mut groups: IndexMap<AtomId, Vec<AtomId>> = IndexMap::new();
        for (source, target) in pairs {
            groups.entry(source).or_default().push(target);
        }
        let ordered: Vec<(AtomId, Vec<AtomId>)> = groups.into_iter().collect();

        let use_local = self.config.needs_local_grid(self.bounding_dimension());
        let base_grid = if use_local {
            None
        } else {
            Some(OccupancyGrid::build_full(self.atoms, self.grid_params()).map_err(DriverError::Grid)?)
        };

        let chunks = split_into_chunks(&ordered, worker_count);
        let chunk_results: Vec<Vec<DistanceRecord>> = std::thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .iter()
                .map(|chunk| {
                    let base_grid = base_grid.as_ref();
                    scope.spawn(move || self.run_chunk(chunk, use_local, base_grid, cancel))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("worker thread panicked"))
                .collect()
        });

        let mut records: Vec<DistanceRecord> = chunk_results.into_iter().flatten().collect();
        for (position, record) in records.iter_mut().enumerate() {
            record.index = position;
        }
        Ok(records)
    }

    fn run_chunk(
        &self,
        chunk: &[(AtomId, Vec<AtomId>)],
        use_local: bool,
        base_grid: Option<&OccupancyGrid>,
        cancel: &CancelToken,
    ) -> Vec<DistanceRecord> {
        let mut records = Vec::new();
        let mut index = 0usize;

        if use_local {
            for (source, targets) in chunk {
                if cancel.is_cancelled() {
                    break;
                }
                if let Err(err) = self.run_source_local(*source, targets, &mut records, &mut index) {
                    warn!("local grid build for source {source} failed: {err}; skipping its pairs");
                }
            }
        } else {
            let base = base_grid.expect("full-grid mode always supplies a base grid");
            let mut grid = base.clone();
            let mut search = PathSearch::new(&grid);
            for (source, targets) in chunk {
                if cancel.is_cancelled() {
                    break;
                }
                self.run_source_full(&mut grid, &mut search, *source, targets, &mut records, &mut index);
            }
        }

        records
    }

    #[allow(clippy::too_many_arguments)]
    fn run_source_full(
        &self,
        grid: &mut OccupancyGrid,
        search: &mut PathSearch,
        source: AtomId,
        targets: &[AtomId],
        records: &mut Vec<DistanceRecord>,
        index: &mut usize,
    ) {
        let source_atom = self.atoms.get(source).expect("enumerated AtomId is valid");
        let mut opened: SmallVec<[AtomId; 8]> = SmallVec::from_slice(&[source]);
        for &t in targets {
            if t != source && !opened.contains(&t) {
                opened.push(t);
            }
        }
        for &id in &opened {
            let _ = grid.release_atom(id);
        }

        let mut to_search: Vec<(AtomId, xwalk_core::GridCoord)> = Vec::new();
        for &target in targets {
            let target_atom = self.atoms.get(target).expect("enumerated AtomId is valid");
            let euclidean = source_atom.position().distance_to(&target_atom.position());

            if euclidean > self.config.max_distance
                && Self::straight_line_is_clear(
                    grid,
                    source_atom.position(),
                    target_atom.position(),
                    self.config.grid_cell_size,
                )
            {
                records.push(self.build_record(*index, source, target, euclidean, Some(euclidean)));
                *index += 1;
                continue;
            }

            match grid.world_to_index(&target_atom.position()) {
                Some(coord) if grid.is_occupied(coord) => {
                    warn!(
                        "target {target} cell could not be cleared (overlapping atom); \
                         reporting this pair unreachable"
                    );
                    records.push(self.build_record(*index, source, target, euclidean, None));
                    *index += 1;
                }
                Some(coord) => to_search.push((target, coord)),
                None => {
                    warn!("target {target} lies outside the grid; reporting unreachable");
                    records.push(self.build_record(*index, source, target, euclidean, None));
                    *index += 1;
                }
            }
        }

        if let Some(source_coord) = grid.world_to_index(&source_atom.position()) {
            let coords: Vec<_> = to_search.iter().map(|(_, c)| *c).collect();
            match search.search(grid, source_coord, &coords, self.config.max_distance) {
                Ok(paths) => {
                    for ((target, _), path) in to_search.iter().zip(paths) {
                        let target_atom = self.atoms.get(*target).expect("valid target");
                        let euclidean = source_atom.position().distance_to(&target_atom.position());
                        let sasd = sasd_from_path(&path);
                        records.push(self.build_record(*index, source, *target, euclidean, sasd));
                        *index += 1;
                    }
                }
                Err(err) => {
                    warn_search_failure(source, &err);
                    for (target, _) in &to_search {
                        let target_atom = self.atoms.get(*target).expect("valid target");
                        let euclidean = source_atom.position().distance_to(&target_atom.position());
                        records.push(self.build_record(*index, source, *target, euclidean, None));
                        *index += 1;
                    }
                }
            }
        } else {
            warn!("source {source} lies outside the grid; reporting its pairs unreachable");
            for (target, _) in &to_search {
                let target_atom = self.atoms.get(*target).expect("valid target");
                let euclidean = source_atom.position().distance_to(&target_atom.position());
                records.push(self.build_record(*index, source, *target, euclidean, None));
                *index += 1;
            }
        }

        for &id in &opened {
            grid.restore_atom(id);
        }
    }

    fn run_source_local(
        &self,
        source: AtomId,
        targets: &[AtomId],
        records: &mut Vec<DistanceRecord>,
        index: &mut usize,
    ) -> Result<(), DriverError> {
        let source_atom = self.atoms.get(source).expect("enumerated AtomId is valid");
        let mut grid = OccupancyGrid::build_local(
            self.atoms,
            self.grid_params(),
            LocalGridSpec {
                source: source_atom.position(),
                max_distance: self.config.max_distance,
            },
        )
        .map_err(DriverError::Grid)?;

        let mut opened: SmallVec<[AtomId; 8]> = SmallVec::from_slice(&[source]);
        for &t in targets {
            if t != source && !opened.contains(&t) {
                opened.push(t);
            }
        }
        for &id in &opened {
            let _ = grid.release_atom(id);
        }

        let mut search = PathSearch::new(&grid);
        let mut to_search = Vec::new();
        for &target in targets {
            let target_atom = self.atoms.get(target).expect("enumerated AtomId is valid");
            let euclidean = source_atom.position().distance_to(&target_atom.position());
            if grid.excluded_atoms().contains(&target) {
                records.push(self.build_record(*index, source, target, euclidean, None));
                *index += 1;
                continue;
            }
            match grid.world_to_index(&target_atom.position()) {
                Some(coord) if grid.is_occupied(coord) => {
                    warn!(
                        "target {target} cell could not be cleared (overlapping atom); \
                         reporting this pair unreachable"
                    );
                    records.push(self.build_record(*index, source, target, euclidean, None));
                    *index += 1;
                }
                Some(coord) => to_search.push((target, coord)),
                None => {
                    records.push(self.build_record(*index, source, target, euclidean, None));
                    *index += 1;
                }
            }
        }

        if let Some(source_coord) = grid.world_to_index(&source_atom.position()) {
            let coords: Vec<_> = to_search.iter().map(|(_, c)| *c).collect();
            match search.search(&grid, source_coord, &coords, self.config.max_distance) {
                Ok(paths) => {
                    for ((target, _), path) in to_search.iter().zip(paths) {
                        let target_atom = self.atoms.get(*target).expect("valid target");
                        let euclidean = source_atom.position().distance_to(&target_atom.position());
                        records.push(self.build_record(*index, source, *target, euclidean, sasd_from_path(&path)));
                        *index += 1;
                    }
                }
                Err(err) => {
                    warn_search_failure(source, &err);
                    for (target, _) in &to_search {
                        let target_atom = self.atoms.get(*target).expect("valid target");
                        let euclidean = source_atom.position().distance_to(&target_atom.position());
                        records.push(self.build_record(*index, source, *target, euclidean, None));
                        *index += 1;
                    }
                }
            }
        }

        Ok(())
    }

    fn build_record(
        &self,
        index: usize,
        source: AtomId,
        target: AtomId,
        euclidean: f64,
        sasd: Option<f64>,
    ) -> DistanceRecord {
        let source_atom = self.atoms.get(source).expect("valid source");
        let target_atom = self.atoms.get(target).expect("valid target");
        DistanceRecord {
            index,
            source,
            target,
            source_descriptor: source_atom.descriptor(),
            target_descriptor: target_atom.descriptor(),
            euclidean_distance: Some(euclidean),
            sasd,
        }
    }
}

fn sasd_from_path(path: &Path) -> Option<f64> {
    if path.is_sentinel() {
        None
    } else {
        Some(path.distance())
    }
}

fn warn_search_failure(source: AtomId, err: &SearchError) {
    warn!("search from source {source} failed: {err}; reporting its remaining pairs unreachable");
}

/// Split `items` into at most `worker_count` contiguous, near-equal chunks,
/// preserving order so that concatenating the chunks back together restores
/// the original sequence.
fn split_into_chunks<T: Clone>(items: &[T], worker_count: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let worker_count = worker_count.min(items.len()).max(1);
    let base = items.len() / worker_count;
    let remainder = items.len() % worker_count;

    let mut chunks = Vec::with_capacity(worker_count);
    let mut start = 0;
    for worker in 0..worker_count {
        let size = base + usize::from(worker < remainder);
        chunks.push(items[start..start + size].to_vec());
        start += size;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{PairSpec, Selector};
    use xwalk_core::{Atom, Element};

    fn atom(serial: i64, name: &str, chain: char, x: f64, y: f64, z: f64) -> Atom {
        Atom::new(serial, name, "LYS", serial as i32, None, chain, None, Point::new(x, y, z), Element::N).unwrap()
    }

    #[test]
    fn vacuum_pair_sasd_close_to_euclidean() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        atoms.push(atom(2, "NZ", 'A', 10.0, 0.0, 0.0));
        let config = XwalkConfig {
            pair_spec: PairSpec {
                selector_a: Selector::any(),
                selector_b: Selector::any(),
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();
        let records = driver.run().unwrap();
        let forward = records
            .iter()
            .find(|r| r.source == AtomId(0) && r.target == AtomId(1))
            .expect("forward pair present");
        let sasd = forward.sasd.expect("reachable");
        assert!((sasd - 10.0).abs() < 1.8, "sasd {sasd} too far from 10.0");
    }

    #[test]
    fn single_atom_produces_no_pairs() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        let config = XwalkConfig {
            pair_spec: PairSpec {
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();
        let records = driver.run().unwrap();
        assert!(records.is_empty(), "a lone atom has no valid partner and must not self-pair");
    }

    #[test]
    fn unreachable_pair_reports_sentinel() {
        // A blocking atom sits on the straight line between source and
        // target so the Euclidean-equality shortcut cannot apply, forcing
        // a genuine bounded search that exhausts `max_distance` first.
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        atoms.push(atom(2, "NZ", 'A', 30.0, 0.0, 0.0));
        atoms.push(atom(3, "CA", 'A', 15.0, 0.0, 0.0));
        let config = XwalkConfig {
            max_distance: 5.0,
            pair_spec: PairSpec {
                selector_a: Selector {
                    atom_names: vec!["NZ".to_string()],
                    ..Selector::any()
                },
                selector_b: Selector {
                    atom_names: vec!["NZ".to_string()],
                    ..Selector::any()
                },
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();
        let records = driver.run().unwrap();
        let forward = records
            .iter()
            .find(|r| r.source == AtomId(0) && r.target == AtomId(1))
            .expect("forward pair present");
        assert_eq!(forward.sasd, None);
        assert_eq!(forward.to_tsv_fields()[4], "-");
    }

    #[test]
    fn parallel_run_matches_sequential_run() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        atoms.push(atom(2, "NZ", 'A', 10.0, 0.0, 0.0));
        atoms.push(atom(3, "NZ", 'B', 0.0, 10.0, 0.0));
        atoms.push(atom(4, "NZ", 'B', 10.0, 10.0, 0.0));
        let config = XwalkConfig {
            pair_spec: PairSpec {
                selector_a: Selector::any(),
                selector_b: Selector::any(),
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();

        let mut sequential = driver.run().unwrap();
        let mut parallel = driver.run_parallel(3, &CancelToken::new()).unwrap();

        let key = |r: &DistanceRecord| (r.source, r.target);
        sequential.sort_by_key(key);
        parallel.sort_by_key(key);
        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(s.source, p.source);
            assert_eq!(s.target, p.target);
            assert_eq!(s.sasd, p.sasd);
        }
    }

    #[test]
    fn cancelling_before_run_parallel_yields_no_records() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        atoms.push(atom(2, "NZ", 'A', 10.0, 0.0, 0.0));
        let config = XwalkConfig {
            pair_spec: PairSpec {
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let records = driver.run_parallel(2, &cancel).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn one_unclearable_target_does_not_poison_its_siblings() {
        // T2 sits exactly where an unrelated, unselected atom (X) also sits,
        // so releasing T2's shell alone cannot clear that cell: X's own
        // occupancy keeps it blocked. T1, a perfectly healthy sibling target
        // of the same source batch, must still get a real SASD.
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0)); // source
        atoms.push(atom(2, "NZ", 'A', 10.0, 0.0, 0.0)); // T1: healthy
        atoms.push(atom(3, "NZ", 'A', 20.0, 0.0, 0.0)); // T2: unclearable
        atoms.push(Atom::new(4, "CA", "LYS", 4, None, 'A', None, Point::new(20.0, 0.0, 0.0), Element::C).unwrap()); // X

        let config = XwalkConfig {
            pair_spec: PairSpec {
                selector_a: Selector {
                    atom_names: vec!["NZ".to_string()],
                    ..Selector::any()
                },
                selector_b: Selector {
                    atom_names: vec!["NZ".to_string()],
                    ..Selector::any()
                },
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        };
        let driver = DistanceDriver::new(&atoms, config).unwrap();
        let records = driver.run().unwrap();

        let to_t1 = records
            .iter()
            .find(|r| r.source == AtomId(0) && r.target == AtomId(1))
            .expect("source-to-T1 pair present");
        let to_t2 = records
            .iter()
            .find(|r| r.source == AtomId(0) && r.target == AtomId(2))
            .expect("source-to-T2 pair present");

        assert!(to_t1.sasd.is_some(), "healthy sibling target must not be poisoned");
        assert_eq!(to_t2.sasd, None);
    }

    use proptest::prelude::*;

    fn directional_any_pair_config(max_distance: f64, grid_cell_size: f64) -> XwalkConfig {
        XwalkConfig {
            max_distance,
            grid_cell_size,
            pair_spec: PairSpec {
                selector_a: Selector::any(),
                selector_b: Selector::any(),
                directional: true,
                ..PairSpec::default()
            },
            ..XwalkConfig::default()
        }
    }

    fn two_vacuum_atoms(dx: f64, dy: f64, dz: f64) -> AtomList {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, "NZ", 'A', 0.0, 0.0, 0.0));
        atoms.push(atom(2, "NZ", 'A', dx, dy, dz));
        atoms
    }

    fn forward_sasd(atoms: &AtomList, config: XwalkConfig) -> Option<f64> {
        let driver = DistanceDriver::new(atoms, config).unwrap();
        let records = driver.run().unwrap();
        records
            .iter()
            .find(|r| r.source == AtomId(0) && r.target == AtomId(1))
            .expect("forward pair present")
            .sasd
    }

    proptest! {
        #[test]
        fn sasd_is_never_less_than_euclidean(
            dx in 6.0..25.0_f64, dy in -10.0..10.0_f64, dz in -10.0..10.0_f64,
        ) {
            let atoms = two_vacuum_atoms(dx, dy, dz);
            let euclidean = atoms.get(AtomId(0)).unwrap().position()
                .distance_to(&atoms.get(AtomId(1)).unwrap().position());
            let config = directional_any_pair_config(euclidean + 10.0, 1.0);
            if let Some(sasd) = forward_sasd(&atoms, config) {
                prop_assert!(sasd >= euclidean - 1e-6);
            }
        }

        #[test]
        fn sasd_is_symmetric_within_one_cell_diagonal(
            dx in 6.0..25.0_f64, dy in -10.0..10.0_f64, dz in -10.0..10.0_f64,
        ) {
            let atoms = two_vacuum_atoms(dx, dy, dz);
            let euclidean = atoms.get(AtomId(0)).unwrap().position()
                .distance_to(&atoms.get(AtomId(1)).unwrap().position());
            let cell_size = 1.0;
            let config = directional_any_pair_config(euclidean + 10.0, cell_size);
            let driver = DistanceDriver::new(&atoms, config).unwrap();
            let records = driver.run().unwrap();
            let forward = records
                .iter()
                .find(|r| r.source == AtomId(0) && r.target == AtomId(1))
                .and_then(|r| r.sasd);
            let backward = records
                .iter()
                .find(|r| r.source == AtomId(1) && r.target == AtomId(0))
                .and_then(|r| r.sasd);
            if let (Some(f), Some(b)) = (forward, backward) {
                prop_assert!((f - b).abs() <= cell_size * 3f64.sqrt() + 1e-6);
            }
        }

        #[test]
        fn halving_cell_size_does_not_increase_sasd(
            dx in 6.0..25.0_f64, dy in -8.0..8.0_f64, dz in -8.0..8.0_f64,
        ) {
            let atoms = two_vacuum_atoms(dx, dy, dz);
            let euclidean = atoms.get(AtomId(0)).unwrap().position()
                .distance_to(&atoms.get(AtomId(1)).unwrap().position());
            let coarse_cell = 2.0;
            let fine_cell = 1.0;
            let coarse = forward_sasd(&atoms, directional_any_pair_config(euclidean + 10.0, coarse_cell));
            let fine = forward_sasd(&atoms, directional_any_pair_config(euclidean + 10.0, fine_cell));
            if let (Some(coarse_sasd), Some(fine_sasd)) = (coarse, fine) {
                let tolerance = (coarse_cell + fine_cell) * 3f64.sqrt();
                prop_assert!(fine_sasd <= coarse_sasd + tolerance);
            }
        }

        #[test]
        fn adding_an_interior_atom_cannot_decrease_sasd(
            dx in 10.0..25.0_f64, dy in -6.0..6.0_f64, dz in -6.0..6.0_f64,
        ) {
            let baseline = two_vacuum_atoms(dx, dy, dz);
            let euclidean = baseline.get(AtomId(0)).unwrap().position()
                .distance_to(&baseline.get(AtomId(1)).unwrap().position());
            let config = directional_any_pair_config(euclidean + 15.0, 1.0);
            let before = forward_sasd(&baseline, config.clone());

            // A third atom at the segment's midpoint: inside the convex hull
            // of the original two-atom structure by construction.
            let mut with_extra = baseline.clone();
            with_extra.push(Atom::new(
                3,
                "CA",
                "LYS",
                3,
                None,
                'A',
                None,
                Point::new(dx / 2.0, dy / 2.0, dz / 2.0),
                Element::C,
            ).unwrap());
            let after = forward_sasd(&with_extra, config);

            if let (Some(b), Some(a)) = (before, after) {
                prop_assert!(a >= b - 1e-6);
            }
        }
    }
}
