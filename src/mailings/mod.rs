mod digest;

pub use digest::{send_digest, DigestMessage, DigestOutcome, DIGEST_SUBJECT};
