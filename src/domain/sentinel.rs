//! In-band "absent" markers shared with the scraper that uploads records and
//! with the Airtable base. They are only matched while decoding a record and
//! only emitted while serializing a patch.

/// `artistEmail` value meaning the scraper found no email.
pub const NO_ARTIST_EMAIL: &str = "NONE";

/// Contact channel value (and the sole contact line) meaning "channel absent".
pub const CONTACT_NOT_PROVIDED: &str = "Not provided";

/// `ArtistEmail` cell value when no email could be resolved.
pub const EMAIL_NOT_PROVIDED: &str = "Not Provided";

/// Reserved key of a structured contact that carries the email address.
pub const CONTACT_EMAIL_KEY: &str = "Email";
