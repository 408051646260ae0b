//! Shared constants for tests.

pub const TEST_USERNAME: &str = "test-listener";
pub const TEST_API_KEY: &str = "test-api-key";

pub const TRACK_1_NAME: &str = "Teardrop";
pub const TRACK_1_ARTIST: &str = "Massive Attack";
pub const TRACK_2_NAME: &str = "Karma Police";
pub const TRACK_2_ARTIST: &str = "Radiohead";
pub const TRACK_3_NAME: &str = "Windowlicker";
pub const TRACK_3_ARTIST: &str = "Aphex Twin";
