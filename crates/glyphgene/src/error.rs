//! Structured errors for gene and archetype builds.
//!
//! All variants abort only the build that raised them; a batch driver
//! is free to continue with its next item. Nothing is ever silently
//! corrected and no partial output is exposed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed gene parameter token, reported at parse time before
    /// any option is applied.
    #[error("`{token}` is not a recognized gene option")]
    Specification { token: String },

    /// Post-assembly coherence invariant failure: a defect in the
    /// enforcement logic or upstream data, never a user input error.
    #[error(
        "segment {segment} should be {} but is not: [{}] coherence {:?}",
        if *coherent { "coherent" } else { "incoherent" },
        vectors.join(" "),
        counts
    )]
    Coherence {
        /// 1-based segment index in the assembled stream.
        segment: usize,
        /// The segment's declared intent.
        coherent: bool,
        /// Vector names of the offending segment.
        vectors: Vec<&'static str>,
        /// Per-position count of coherent triples covering the position.
        counts: Vec<u32>,
    },

    /// Malformed or incomplete character definition; propagated
    /// unmodified, never retried.
    #[error("character definition: {reason}")]
    UpstreamData { reason: String },
}

impl Error {
    pub fn specification(token: impl Into<String>) -> Error {
        Error::Specification {
            token: token.into(),
        }
    }

    pub fn upstream(reason: impl Into<String>) -> Error {
        Error::UpstreamData {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = Error::specification("q9");
        assert_eq!(e.to_string(), "`q9` is not a recognized gene option");

        let e = Error::Coherence {
            segment: 2,
            coherent: true,
            vectors: vec!["Eam", "Eam"],
            counts: vec![0, 0],
        };
        let msg = e.to_string();
        assert!(msg.contains("segment 2"));
        assert!(msg.contains("coherent"));
        assert!(msg.contains("Eam"));
    }
}
