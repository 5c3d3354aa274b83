#![deny(clippy::all, clippy::pedantic)]

use foglio::client::BlogClient;
use foglio::client::models::{LoginRequest, RegisterRequest};

use crate::args::AdminCmd;
use crate::context::CliError;

pub async fn handle(client: &BlogClient, cmd: AdminCmd) -> Result<(), CliError> {
    match cmd {
        AdminCmd::Register { username, password } => {
            client
                .register(&RegisterRequest { username, password })
                .await?;
            println!("registered");
            Ok(())
        }
        AdminCmd::Login { username, password } => {
            let token = client.login(&LoginRequest { username, password }).await?;
            // The raw token goes to stdout so callers can pipe it into a
            // token file for later authenticated runs.
            println!("{token}");
            Ok(())
        }
    }
}
