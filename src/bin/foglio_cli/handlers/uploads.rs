#![deny(clippy::all, clippy::pedantic)]

use foglio::client::BlogClient;

use crate::args::UploadsCmd;
use crate::context::CliError;
use crate::io::read_upload;

pub async fn handle(client: &BlogClient, cmd: UploadsCmd) -> Result<(), CliError> {
    match cmd {
        UploadsCmd::Image { file } => {
            let url = client.upload_image(read_upload(&file)?).await?;
            println!("{url}");
            Ok(())
        }
        UploadsCmd::Attach { id, file } => {
            let url = client.attach_image(&id, read_upload(&file)?).await?;
            println!("{url}");
            Ok(())
        }
    }
}
