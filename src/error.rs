use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

#[derive(Debug, Diagnostic)]
pub enum HuechordError {
    #[diagnostic(code(huechord::terminal), url(docsrs))]
    Terminal {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(huechord::store), url(docsrs))]
    Store {
        path: PathBuf,
        #[source_code]
        src: String,
        #[label("store operation failed here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(huechord::event), url(docsrs))]
    Event {
        #[source_code]
        src: String,
        #[label("event error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(huechord::channel), url(docsrs))]
    ChannelClosed {
        #[source_code]
        src: String,
        #[label("channel closed")]
        err_span: SourceSpan,
    },
}

pub type HuechordResult<T> = miette::Result<T>;

impl Display for HuechordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            HuechordError::Terminal { msg, .. } => write!(f, "Terminal error: {}", msg),
            HuechordError::Store { path, msg, .. } => {
                write!(f, "Store error at {}: {}", path.display(), msg)
            }
            HuechordError::Event { msg, .. } => write!(f, "Event error: {}", msg),
            HuechordError::ChannelClosed { .. } => write!(f, "Channel closed"),
        }
    }
}

impl Error for HuechordError {}

impl HuechordError {
    pub fn terminal(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Terminal {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn store(
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Store {
            path: path.into(),
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn event(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Event {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn channel_closed(src: impl Into<String>, err_span: impl Into<SourceSpan>) -> Self {
        Self::ChannelClosed {
            src: src.into(),
            err_span: err_span.into(),
        }
    }
}
