//! Token debugging commands.

use chatdesk_core::identity::IdentityService;
use chatdesk_types::identity::OwnerId;

/// `chatdesk token <subject>` -- print a token in the same format as login.
pub fn issue(subject: &str, json: bool) -> anyhow::Result<()> {
    let token = IdentityService::new().issue_token(subject.trim())?;

    if json {
        let out = serde_json::json!({ "subject": subject.trim(), "token": token });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{token}");
    }
    Ok(())
}

/// `chatdesk whoami <token>` -- print the subject and owner key.
pub fn whoami(token: &str, json: bool) -> anyhow::Result<()> {
    let subject = IdentityService::new().resolve_subject(token)?;
    let owner = OwnerId::new(&subject);

    if json {
        let out = serde_json::json!({ "subject": subject, "owner": owner });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("  Subject: {}", console::style(&subject).cyan());
        println!("  Owner:   {}", console::style(owner).dim());
        println!();
    }
    Ok(())
}
