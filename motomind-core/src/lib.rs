//! motomind-core: marketplace logic with no I/O
//!
//! Price positioning, quiz personas and recommendation annotation, review
//! validation and rating aggregation. The server crate feeds query rows
//! through these functions; nothing here touches the database.

pub mod community;
pub mod error;
pub mod lang;
pub mod persona;
pub mod pricing;
pub mod recommend;
pub mod review;
pub mod trust;

pub use community::{NewPost, PostDraft};
pub use error::{ValidationError, ValidationResult};
pub use lang::{Bilingual, Lang};
pub use persona::{Persona, Ranking};
pub use pricing::{price_position, MarketBand, PricePosition};
pub use recommend::{annotate, Annotation, CandidateFilter, ListingSignals, Quiz};
pub use review::{NewReview, ReviewDraft, ReviewerRole};
pub use trust::{average_rating, summarize, RatingSummary};
