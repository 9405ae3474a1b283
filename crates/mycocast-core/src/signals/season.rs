//! Guild season gate on the calendar month.

use crate::guilds::GuildProfile;

/// In-season boost.
const IN_SEASON: f64 = 1.2;
/// Out-of-season sightings are suppressed almost to the floor, not dropped;
/// the record still renders, heavily discounted.
const OUT_OF_SEASON: f64 = 0.1;

/// Seasonality factor for `month` (1-12).
pub fn seasonality_score(profile: &GuildProfile, month: u32) -> f64 {
    if profile.season_months.contains(&month) {
        IN_SEASON
    } else {
        OUT_OF_SEASON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guilds::builtin_profiles;

    #[test]
    fn every_month_is_either_boost_or_penalty() {
        for profile in builtin_profiles() {
            for month in 1..=12 {
                let s = seasonality_score(&profile, month);
                let expected = if profile.season_months.contains(&month) {
                    1.2
                } else {
                    0.1
                };
                assert_eq!(s, expected, "{} month {month}", profile.name);
            }
        }
    }

    #[test]
    fn chanterelle_in_december_out_in_july() {
        let profiles = builtin_profiles();
        let chanterelle = &profiles[0];
        assert_eq!(seasonality_score(chanterelle, 12), 1.2);
        assert_eq!(seasonality_score(chanterelle, 7), 0.1);
    }
}
