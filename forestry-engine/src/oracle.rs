//! Relationship oracle — decides whether two identities are "associated"
//! (friend, clan-mate, or teammate) by querying the social collaborators.

use crate::config::ProtectionConfig;
use crate::services::{ClanProvider, FriendsProvider, TeamProvider};
use forestry_types::PlayerId;
use std::sync::Arc;
use tracing::debug;

/// Stateless query layer over the optional social collaborators.
///
/// Each category is consulted only when both its config flag is set and its
/// collaborator is present. The categories are ORed together and do not
/// short-circuit each other; a missing or negative answer from one never
/// suppresses the next. Absent collaborators read as "not associated".
#[derive(Default)]
pub struct RelationshipOracle {
    friends: Option<Arc<dyn FriendsProvider>>,
    clans: Option<Arc<dyn ClanProvider>>,
    teams: Option<Arc<dyn TeamProvider>>,
}

impl RelationshipOracle {
    #[must_use]
    pub fn new(
        friends: Option<Arc<dyn FriendsProvider>>,
        clans: Option<Arc<dyn ClanProvider>>,
        teams: Option<Arc<dyn TeamProvider>>,
    ) -> Self {
        Self {
            friends,
            clans,
            teams,
        }
    }

    /// Returns true when `a` and `b` are associated under any enabled
    /// category. Pure query, no side effects.
    #[must_use]
    pub fn are_associated(&self, config: &ProtectionConfig, a: PlayerId, b: PlayerId) -> bool {
        let mut associated = false;

        if config.use_friends {
            if let Some(friends) = &self.friends {
                if friends.are_friends(a, b) {
                    debug!("friends collaborator reports {a} and {b} are friends");
                    associated = true;
                }
            }
        }

        if config.use_clans {
            if let Some(clans) = &self.clans {
                // None never equals None: two clanless players are not
                // associated.
                match (clans.clan_of(a), clans.clan_of(b)) {
                    (Some(ca), Some(cb)) if ca == cb => {
                        debug!("clans collaborator reports {a} and {b} are clanmates");
                        associated = true;
                    }
                    _ => {}
                }
            }
        }

        if config.use_teams {
            if let Some(teams) = &self.teams {
                if let Some(team) = teams.current_team_of(a) {
                    if teams.team_members(team).contains(&b) {
                        debug!("team roster reports {a} and {b} are teammates");
                        associated = true;
                    }
                }
            }
        }

        associated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct NoFriends;
    impl FriendsProvider for NoFriends {
        fn are_friends(&self, _: PlayerId, _: PlayerId) -> bool {
            false
        }
    }

    struct AllFriends;
    impl FriendsProvider for AllFriends {
        fn are_friends(&self, _: PlayerId, _: PlayerId) -> bool {
            true
        }
    }

    struct FixedClans(Vec<(PlayerId, &'static str)>);
    impl ClanProvider for FixedClans {
        fn clan_of(&self, player: PlayerId) -> Option<String> {
            self.0
                .iter()
                .find(|(p, _)| *p == player)
                .map(|(_, c)| c.to_string())
        }
    }

    struct OneTeam {
        team: u64,
        members: HashSet<PlayerId>,
    }
    impl TeamProvider for OneTeam {
        fn current_team_of(&self, player: PlayerId) -> Option<u64> {
            self.members.contains(&player).then_some(self.team)
        }
        fn team_members(&self, team: u64) -> HashSet<PlayerId> {
            if team == self.team {
                self.members.clone()
            } else {
                HashSet::new()
            }
        }
    }

    fn config(friends: bool, clans: bool, teams: bool) -> ProtectionConfig {
        ProtectionConfig {
            use_friends: friends,
            use_clans: clans,
            use_teams: teams,
            ..ProtectionConfig::default()
        }
    }

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);

    // ================================================================
    // Friends category
    // ================================================================

    #[test]
    fn friends_enabled_and_reported() {
        let oracle = RelationshipOracle::new(Some(Arc::new(AllFriends)), None, None);
        assert!(oracle.are_associated(&config(true, false, false), A, B));
    }

    #[test]
    fn friends_flag_off_ignores_collaborator() {
        let oracle = RelationshipOracle::new(Some(Arc::new(AllFriends)), None, None);
        assert!(!oracle.are_associated(&config(false, false, false), A, B));
    }

    #[test]
    fn friends_collaborator_absent_is_not_associated() {
        let oracle = RelationshipOracle::new(None, None, None);
        assert!(!oracle.are_associated(&config(true, false, false), A, B));
    }

    // ================================================================
    // Clans category
    // ================================================================

    #[test]
    fn equal_clans_are_associated() {
        let clans = FixedClans(vec![(A, "kraken"), (B, "kraken")]);
        let oracle = RelationshipOracle::new(None, Some(Arc::new(clans)), None);
        assert!(oracle.are_associated(&config(false, true, false), A, B));
    }

    #[test]
    fn different_clans_are_not_associated() {
        let clans = FixedClans(vec![(A, "kraken"), (B, "squid")]);
        let oracle = RelationshipOracle::new(None, Some(Arc::new(clans)), None);
        assert!(!oracle.are_associated(&config(false, true, false), A, B));
    }

    #[test]
    fn both_clanless_is_not_associated() {
        let clans = FixedClans(vec![]);
        let oracle = RelationshipOracle::new(None, Some(Arc::new(clans)), None);
        assert!(!oracle.are_associated(&config(false, true, false), A, B));
    }

    // ================================================================
    // Teams category
    // ================================================================

    #[test]
    fn shared_team_roster_is_associated() {
        let teams = OneTeam {
            team: 9,
            members: [A, B].into_iter().collect(),
        };
        let oracle = RelationshipOracle::new(None, None, Some(Arc::new(teams)));
        assert!(oracle.are_associated(&config(false, false, true), A, B));
    }

    #[test]
    fn teamless_first_identity_is_not_associated() {
        let teams = OneTeam {
            team: 9,
            members: [B].into_iter().collect(),
        };
        let oracle = RelationshipOracle::new(None, None, Some(Arc::new(teams)));
        assert!(!oracle.are_associated(&config(false, false, true), A, B));
    }

    // ================================================================
    // Cross-category OR
    // ================================================================

    #[test]
    fn later_category_rescues_earlier_negative() {
        // Friends says no, clans says yes: still associated.
        let clans = FixedClans(vec![(A, "kraken"), (B, "kraken")]);
        let oracle =
            RelationshipOracle::new(Some(Arc::new(NoFriends)), Some(Arc::new(clans)), None);
        assert!(oracle.are_associated(&config(true, true, false), A, B));
    }

    #[test]
    fn all_categories_disabled_is_never_associated() {
        let oracle = RelationshipOracle::new(Some(Arc::new(AllFriends)), None, None);
        assert!(!oracle.are_associated(&config(false, false, false), A, A));
    }
}
