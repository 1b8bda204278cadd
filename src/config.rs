use clap::Args;

/// Occupant slots per room. The ship never changes shape.
pub const ROOM_CAPACITY: usize = 3;
/// Rooms in the ship: control, reception, and three configurable bays.
pub const ROOM_COUNT: usize = 5;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub rates: BaseRates,
    #[command(flatten)]
    pub search: SearchParams,
}

/// Calibrated game constants. Exposed as flags so alternate balance
/// patches can be tried without a rebuild, but the defaults are the
/// live game values and tests assume them.
#[derive(Args, Debug, Clone)]
pub struct BaseRates {
    /// Mood lost per hour while a room is working (%).
    #[arg(long, default_value_t = 7.0)]
    pub base_mood_drop: f64,

    /// Mood recovered per hour while resting (%).
    #[arg(long, default_value_t = 12.0)]
    pub base_mood_regen: f64,

    /// Output of an empty room at full mood (%).
    #[arg(long, default_value_t = 100.0)]
    pub base_efficiency: f64,

    /// Flat output added per assigned operator (%).
    #[arg(long, default_value_t = 40.0)]
    pub operator_bonus: f64,

    /// Cap on summed mood-drop reduction. Keeps the effective drop
    /// strictly positive so uptime never divides by zero.
    #[arg(long, default_value_t = 99.0)]
    pub max_drop_reduction: f64,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Full refinement passes per control-room roster before giving up.
    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,

    /// Minimum total-efficiency gain for a local move to be accepted.
    #[arg(long, default_value_t = 0.01)]
    pub epsilon: f64,

    /// Rosters tried between cooperative yield points.
    #[arg(long, default_value_t = 10)]
    pub yield_interval: usize,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            base_mood_drop: 7.0,
            base_mood_regen: 12.0,
            base_efficiency: 100.0,
            operator_bonus: 40.0,
            max_drop_reduction: 99.0,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            epsilon: 0.01,
            yield_interval: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates: BaseRates::default(),
            search: SearchParams::default(),
        }
    }
}

impl BaseRates {
    /// Nominal output of a fully-crewed room with no production talents,
    /// as a multiplier. Used by the greedy scorer to weigh uptime gains.
    pub fn full_room_factor(&self) -> f64 {
        (self.base_efficiency + self.operator_bonus * ROOM_CAPACITY as f64) / 100.0
    }
}
