//! Startup banner.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Server configuration shown at startup. Never carries the API key.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub listen: &'a str,
    pub template: &'a str,
}

pub fn format_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             O R A C L E               ║
   ║      ask, and the machine answers     ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   model     {}
   listen    http://{}
   template  {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.model,
        info.listen,
        info.template,
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", format_banner(info));
}
