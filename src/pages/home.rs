//! Landing page.

use anyhow::Result;

use crate::app::AppContext;

/// Points a signed-in user at their dashboard, everyone else at sign-in.
pub fn show(app: &AppContext) -> Result<()> {
    println!("PeerSkill - trade what you know for what you want to learn.");
    if app.session.is_signed_in() {
        println!("Go to your dashboard: peerskill {}", app.session.home_page());
    } else {
        println!("Sign in:        peerskill login <email>");
        println!("Create account: peerskill signup");
    }
    Ok(())
}
