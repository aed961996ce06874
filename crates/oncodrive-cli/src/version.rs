//! Version string reported by `--version`.

use std::sync::LazyLock;

static BUILD_VERSION: LazyLock<String> = LazyLock::new(|| {
    let commit = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    let dirty = if option_env!("VERGEN_GIT_DIRTY") == Some("true") {
        "-dirty"
    } else {
        ""
    };
    format!("{} ({commit}{dirty})", env!("CARGO_PKG_VERSION"))
});

/// `pkg_version (short_sha)`, with `-dirty` appended for uncommitted
/// changes and `unknown` outside a git checkout.
#[must_use]
pub(crate) fn build_version() -> &'static str {
    &BUILD_VERSION
}
