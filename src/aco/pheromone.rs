//! Pheromone trail matrix.

/// Mutable `n × n` matrix of trail strengths.
///
/// The field is reset once per run, then decays and is reinforced once
/// per iteration. Entries stay non-negative and finite as long as the
/// evaporation rate lies in `[0, 1)` and deposits are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    towns: usize,
    trails: Vec<f64>,
}

impl PheromoneField {
    /// Creates a field over `towns` towns with every entry set to `initial`.
    pub fn new(towns: usize, initial: f64) -> Self {
        Self {
            towns,
            trails: vec![initial; towns * towns],
        }
    }

    /// Sets every entry to `c`.
    pub fn reset(&mut self, c: f64) {
        self.trails.fill(c);
    }

    /// Multiplies every entry by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        debug_assert!((0.0..1.0).contains(&rho), "evaporation out of range: {rho}");
        let keep = 1.0 - rho;
        for t in &mut self.trails {
            *t *= keep;
        }
    }

    /// Adds `deposit` to every directed edge of the closed `tour`.
    pub fn reinforce(&mut self, tour: &[usize], deposit: f64) {
        let n = self.towns;
        let Some((&first, &last)) = tour.first().zip(tour.last()) else {
            return;
        };
        for w in tour.windows(2) {
            self.trails[w[0] * n + w[1]] += deposit;
        }
        self.trails[last * n + first] += deposit;
    }

    /// Trail strength on the edge `i -> j`.
    #[inline]
    pub fn strength(&self, i: usize, j: usize) -> f64 {
        self.trails[i * self.towns + j]
    }

    /// Number of towns the field spans.
    pub fn size(&self) -> usize {
        self.towns
    }

    /// All entries, row-major.
    pub fn values(&self) -> &[f64] {
        &self.trails
    }
}
