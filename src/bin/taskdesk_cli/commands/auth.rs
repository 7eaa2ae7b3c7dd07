// ABOUTME: Sign-in and identity commands for taskdesk-cli
// ABOUTME: Handles login, logout, and whoami against the console
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use taskdesk::context::ClientContext;

/// Sign in and persist the credential for later invocations
pub async fn login(ctx: &ClientContext, email: &str, password: &str) -> anyhow::Result<()> {
    let user = ctx.auth().login(email, password).await?;
    println!("Signed in as {} (user {})", user.label(), user.id);
    Ok(())
}

/// Sign out and discard the persisted credential
pub fn logout(ctx: &ClientContext) -> anyhow::Result<()> {
    if ctx.session().is_authenticated() {
        ctx.auth().logout();
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

/// Show the signed-in user, refreshed from the server
pub async fn whoami(ctx: &ClientContext) -> anyhow::Result<()> {
    let user = ctx.auth().profile().await?;
    println!("{} (user {})", user.label(), user.id);
    println!("  email: {}", user.email);
    Ok(())
}
