//! Role-based bus assignment.

use mixdown_core::{AudioTrack, BusConfig, MixGraph};

/// Id of the bus used when no mix graph is supplied.
pub const DEFAULT_BUS_ID: &str = "main";

/// The role tag that is replaced by the track name.
const GENERIC_MUSIC_ROLE: &str = "music";

/// Outcome of routing one clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A bus accepted the role. Index into [`BusRouter::buses`].
    Matched(usize),
    /// Nothing matched; the first bus takes the clip.
    Fallback(usize),
    /// The graph declares no buses.
    Unrouted,
}

impl Route {
    /// The chosen bus index, if any.
    pub fn bus(self) -> Option<usize> {
        match self {
            Self::Matched(i) | Self::Fallback(i) => Some(i),
            Self::Unrouted => None,
        }
    }
}

/// Lower-cased routing role for clips on `track`.
///
/// Generic "music" tracks with a name route under their name instead, so
/// individual music tracks can target their own buses.
///
/// ```rust
/// use mixdown_compiler::clip_role;
/// use mixdown_core::AudioTrack;
///
/// assert_eq!(clip_role(&AudioTrack::new("t", "Strings").with_role("Music")), "strings");
/// assert_eq!(clip_role(&AudioTrack::new("t", "Kit").with_role("DRUMS")), "drums");
/// assert_eq!(clip_role(&AudioTrack::new("t", "Kit")), "");
/// ```
pub fn clip_role(track: &AudioTrack) -> String {
    let role = track.role_tag().unwrap_or_default().trim().to_lowercase();
    if role == GENERIC_MUSIC_ROLE && !track.name.trim().is_empty() {
        return track.name.trim().to_lowercase();
    }
    role
}

/// Assigns roles to buses in declared order.
#[derive(Debug, Clone)]
pub struct BusRouter {
    buses: Vec<BusConfig>,
    roles: Vec<Vec<String>>,
    accept_all: bool,
}

impl BusRouter {
    /// Router for `graph`, or a single catch-all bus when there is none.
    pub fn new(graph: Option<&MixGraph>) -> Self {
        let Some(graph) = graph else {
            return Self {
                buses: vec![BusConfig::new(DEFAULT_BUS_ID, "Main")],
                roles: vec![Vec::new()],
                accept_all: true,
            };
        };
        let roles = graph
            .buses
            .iter()
            .map(|bus| {
                bus.roles
                    .iter()
                    .map(|r| r.trim().to_lowercase())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .collect();
        Self {
            buses: graph.buses.clone(),
            roles,
            accept_all: false,
        }
    }

    /// Buses in declared order.
    pub fn buses(&self) -> &[BusConfig] {
        &self.buses
    }

    /// Route a lower-cased role.
    ///
    /// A bus matches when one of its roles equals the clip role, contains
    /// it, or is contained by it. An empty clip role is contained by every
    /// role, so it lands on the first bus that declares any.
    pub fn route(&self, role: &str) -> Route {
        if self.buses.is_empty() {
            return Route::Unrouted;
        }
        if self.accept_all {
            return Route::Matched(0);
        }
        let hit = self.roles.iter().position(|accepted| {
            accepted
                .iter()
                .any(|r| r == role || r.contains(role) || role.contains(r.as_str()))
        });
        hit.map_or(Route::Fallback(0), Route::Matched)
    }
}
