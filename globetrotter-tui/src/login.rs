use anyhow::{Context, Result};
use globetrotter::Credentials;
use std::io::{self, BufRead, Write};

use crate::api::ApiClient;

/// Prompt for email and password on the terminal, log in and save the
/// session for later runs.
pub async fn run_login(client: &mut ApiClient) -> Result<()> {
    let email = prompt_email(&mut io::stdin().lock(), &mut io::stdout())?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let session = client
        .login(&Credentials::new(email, password))
        .await
        .context("Login failed")?;
    println!("Logged in as {}. Session saved.", session.user.display_name());
    Ok(())
}

fn prompt_email(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "Email: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read email")?;
    let email = line.trim().to_string();
    anyhow::ensure!(!email.is_empty(), "Email is required");
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_prompt_trims_input() {
        let mut input = io::Cursor::new("  ada@example.com \n");
        let mut output = Vec::new();
        let email = prompt_email(&mut input, &mut output).unwrap();
        assert_eq!(email, "ada@example.com");
        assert_eq!(String::from_utf8(output).unwrap(), "Email: ");
    }

    #[test]
    fn empty_email_is_rejected() {
        let mut input = io::Cursor::new("\n");
        let mut output = Vec::new();
        assert!(prompt_email(&mut input, &mut output).is_err());
    }
}
