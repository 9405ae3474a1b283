//! Guild profiles: static per-guild configuration driving every scored factor.
//!
//! Profiles are keyed by the guild's canonical common name. An observation's
//! free-text `Subject` ("Golden Chanterelle (Cantharellus californicus)") is
//! resolved by substring containment against the canonical names, first
//! profile in declaration order wins. Guilds without a profile score with
//! neutral factors rather than failing.
use serde::Serialize;

/// Host-tree association for a guild. Species ids match the filenames of the
/// host-tree point collections (e.g. "tanoak" → tanoak.json).
#[derive(Debug, Clone, Serialize)]
pub struct HostProfile {
    /// Mycorrhizal partners; proximity to any is strong evidence.
    pub primary: Vec<&'static str>,
    /// Occasional or suspected partners.
    pub secondary: Vec<&'static str>,
}

impl HostProfile {
    /// True when the guild has no mapped host association at all
    /// (saprobic or burn-following guilds).
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Rain and temperature thresholds gating a guild's fruiting response.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FruitingThresholds {
    /// Minimum 14-day precipitation (inches) for a full rain response.
    pub min_rain_in: f64,
    /// Days after a soaking rain when fruiting typically peaks.
    pub optimal_lag_days: u32,
    /// Whether a cold-soil snap boosts fruiting (King Bolete, Burn Morel).
    pub needs_temperature_shock: bool,
}

/// Static configuration for one guild.
#[derive(Debug, Clone, Serialize)]
pub struct GuildProfile {
    /// Canonical common name, the resolution and filename key.
    pub name: &'static str,
    /// Scientific name, display only.
    pub scientific: &'static str,
    pub hosts: HostProfile,
    pub thresholds: FruitingThresholds,
    /// Calendar months (1-12) in which the guild fruits.
    pub season_months: &'static [u32],
}

impl GuildProfile {
    /// Display name as the upstream observation table writes it.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.scientific)
    }

    /// Output layer slug: lowercased, spaces → hyphens.
    pub fn layer_slug(&self) -> String {
        layer_slug(self.name)
    }
}

/// Derive an output filename slug from a guild name: any parenthetical
/// scientific name is stripped, then lowercased with spaces → hyphens.
pub fn layer_slug(name: &str) -> String {
    let base = name.split(" (").next().unwrap_or(name);
    base.to_lowercase().replace(' ', "-")
}

/// The built-in NorCal guild table. Declaration order is the documented
/// first-match resolution order for ambiguous subjects.
pub fn builtin_profiles() -> Vec<GuildProfile> {
    vec![
        GuildProfile {
            name: "Golden Chanterelle",
            scientific: "Cantharellus californicus",
            hosts: HostProfile {
                primary: vec!["coast_live_oak", "tanoak"],
                secondary: vec!["pacific_madrone"],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 2.0,
                optimal_lag_days: 14,
                needs_temperature_shock: false,
            },
            season_months: &[11, 12, 1, 2],
        },
        GuildProfile {
            name: "Hedgehog Mushroom",
            scientific: "Hydnum umbilicatum",
            hosts: HostProfile {
                primary: vec!["douglas_fir", "tanoak"],
                secondary: vec!["bishop_pine"],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 2.5,
                optimal_lag_days: 21,
                needs_temperature_shock: false,
            },
            season_months: &[12, 1, 2, 3],
        },
        GuildProfile {
            name: "Black Trumpet",
            scientific: "Craterellus cornucopioides",
            hosts: HostProfile {
                primary: vec!["tanoak"],
                secondary: vec!["coast_live_oak", "pacific_madrone"],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 3.0,
                optimal_lag_days: 28,
                needs_temperature_shock: false,
            },
            season_months: &[12, 1, 2, 3],
        },
        GuildProfile {
            name: "Candy Cap",
            scientific: "Lactarius rubidus",
            hosts: HostProfile {
                primary: vec!["coast_live_oak"],
                secondary: vec!["douglas_fir", "bishop_pine"],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 2.0,
                optimal_lag_days: 14,
                needs_temperature_shock: false,
            },
            season_months: &[11, 12, 1, 2],
        },
        GuildProfile {
            name: "King Bolete",
            scientific: "Boletus edulis",
            hosts: HostProfile {
                primary: vec!["bishop_pine", "douglas_fir"],
                secondary: vec!["coast_live_oak"],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 1.5,
                optimal_lag_days: 10,
                needs_temperature_shock: true,
            },
            season_months: &[10, 11, 12, 1],
        },
        GuildProfile {
            // Burn followers fruit on fire scars, not root associations.
            name: "Burn Morel",
            scientific: "Morchella spp.",
            hosts: HostProfile {
                primary: vec![],
                secondary: vec![],
            },
            thresholds: FruitingThresholds {
                min_rain_in: 1.0,
                optimal_lag_days: 7,
                needs_temperature_shock: true,
            },
            season_months: &[3, 4, 5, 6],
        },
    ]
}

/// Resolve an observation subject to a profile: first profile (declaration
/// order) whose canonical name is contained in the subject text.
pub fn resolve_profile<'a>(profiles: &'a [GuildProfile], subject: &str) -> Option<&'a GuildProfile> {
    profiles.iter().find(|p| subject.contains(p.name))
}
