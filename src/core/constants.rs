// Roster limits
pub const MAX_TEAM_SIZE: usize = 6;

// Gym progression
pub const MAX_BADGES: u32 = 8;
pub const GYM_COUNT: u32 = 8;
/// Victory needs every badge AND a round past the last gym (the Champion fight).
pub const VICTORY_MIN_ROUND: u32 = GYM_COUNT + 1;

// Shiny odds (starter and roaming captures are tuned separately)
pub const STARTER_SHINY_CHANCE: f64 = 0.02;
pub const ROAMING_SHINY_CHANCE: f64 = 0.01;

// Adventure battles
pub const SIDE_BATTLE_WIN_CHANCE: f64 = 0.5;

// Items
pub const POTION_ID: &str = "potion";
pub const STARTING_POTIONS: u32 = 1;

// Power derivation thresholds on base-stat total (exclusive upper bounds)
pub const POWER_TIER_THRESHOLDS: [u32; 4] = [320, 450, 580, 670];
pub const MIN_POWER_TIER: u8 = 1;
pub const MAX_POWER_TIER: u8 = 5;
pub const LEGENDARY_POWER_TIER: u8 = MAX_POWER_TIER;

// Generations
pub const GENERATION_COUNT: u8 = 8;
