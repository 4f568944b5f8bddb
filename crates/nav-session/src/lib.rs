//! `nav-session` — guidance state machine and driver for the campus
//! navigation core.
//!
//! # Data flow
//!
//! ```text
//! LocationSource ─▶ PositionTracker ─▶ NavigationSession ─▶ Announcer
//!   (sensor)         classify, keep      distance, ETA,        (speech)
//!                    last good fix       instruction,
//!                                        AnnouncementPolicy
//!                                              │
//!                         Navigator::pump ─────┴─▶ NavObserver (UI)
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`announce`]    | `AnnouncementPolicy`, `Announcement`, `Announcer`          |
//! | [`instruction`] | `Instruction`, `Maneuver`, distance-bucket lookup          |
//! | [`session`]     | `NavigationSession`, `Phase`, `Destination`                |
//! | [`snapshot`]    | `Snapshot` read-only view                                  |
//! | [`observer`]    | `NavObserver`, `NoopObserver`, `RecordingObserver`         |
//! | [`navigator`]   | `Navigator` driver                                         |
//! | [`builder`]     | `NavigatorBuilder`                                         |
//! | [`error`]       | `SessionError`, `SessionResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on snapshots.            |

pub mod announce;
pub mod builder;
pub mod error;
pub mod instruction;
pub mod navigator;
pub mod observer;
pub mod session;
pub mod snapshot;


pub use announce::{
    Announcement, AnnouncementPolicy, Announcer, RecordingAnnouncer, SilentAnnouncer, THRESHOLDS_M,
};
pub use builder::NavigatorBuilder;
pub use error::{SessionError, SessionResult};
pub use instruction::{Instruction, Maneuver, instruction_for, turn_side};
pub use navigator::Navigator;
pub use observer::{NavObserver, NoopObserver, RecordingObserver};
pub use session::{Destination, NavigationSession, Phase, SessionEvent};
pub use snapshot::Snapshot;
