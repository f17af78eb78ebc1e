use ariadne::Source;
use std::io;

/// Utility enum to package errors that can occur while reading / evaluating.
pub enum Error {
    /// Error that occurred while reading a type annotation from the command line.
    TypeError(tgp_error::Error),

    /// Error that occurred while reading the input.
    ReadError(tgp_error::Error),

    /// Error that occurred while evaluating.
    EvalError(tgp_error::Error),
}

impl Error {
    /// Report the error in this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type actually does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(self, input: &str) -> io::Result<()> {
        let err = match self {
            Self::TypeError(err) | Self::ReadError(err) => err,
            // evaluation errors have no source spans, so point at the whole input
            Self::EvalError(err) => err.with_spans(vec![0..input.len()]),
        };

        err.build_report("input").eprint(("input", Source::from(input)))
    }
}
