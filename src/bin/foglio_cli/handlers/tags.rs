#![deny(clippy::all, clippy::pedantic)]

use foglio::client::BlogClient;

use crate::args::TagsCmd;
use crate::context::CliError;
use crate::print::print_json;

pub async fn handle(client: &BlogClient, cmd: TagsCmd) -> Result<(), CliError> {
    match cmd {
        TagsCmd::All => {
            let tags = client.all_tags().await?;
            print_json(&tags)
        }
        TagsCmd::Popular => {
            let tags = client.popular_tags().await?;
            print_json(&tags)
        }
    }
}
