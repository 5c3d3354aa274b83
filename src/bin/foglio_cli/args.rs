//! Command-line surface for `foglio-cli`.
//! Kept in one file so tests can exercise the same definitions as the
//! binary itself.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foglio::config::SettingsOverrides;

#[derive(Parser, Debug)]
#[command(name = "foglio-cli", version, about = "Headless blog API CLI", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOGLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post reading, rendering, and management
    Posts(PostsArgs),
    /// Tag listings
    Tags(TagsArgs),
    /// Admin account operations
    Admin(AdminArgs),
    /// Image uploads
    Uploads(UploadsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts, optionally filtered by tag
    List {
        #[arg(long)]
        tag: Option<String>,
        /// Re-sort the listing newest-first before printing
        #[arg(long, default_value_t = false)]
        recent: bool,
    },
    /// Fetch one post as JSON
    Get { id: String },
    /// Render one post's body to HTML (also records a view)
    Show {
        id: String,
        /// Print the table of contents before the HTML
        #[arg(long, default_value_t = false)]
        toc: bool,
    },
    /// Search posts
    Search { query: String },
    /// Server-side sorted listing
    Sort {
        #[arg(long, default_value = "createdAt")]
        by: String,
    },
    /// List posts carrying an exact tag
    ByTag { tag: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Image URL to attach
        #[arg(long)]
        image: Option<String>,
    },
    /// Update all mutable fields of a post
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Image URL to attach
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
    /// Like a post; prints the new count
    Like { id: String },
    /// Comment on a post
    Comment {
        #[arg(long)]
        id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        text: String,
    },
    /// Record a view
    View { id: String },
}

#[derive(Parser, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: TagsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TagsCmd {
    /// Every known tag
    All,
    /// Most used tags
    Popular,
}

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub action: AdminCmd,
}

#[derive(Subcommand, Debug)]
pub enum AdminCmd {
    /// Create an admin account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Authenticate and print the bearer token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Parser, Debug)]
pub struct UploadsArgs {
    #[command(subcommand)]
    pub action: UploadsCmd,
}

#[derive(Subcommand, Debug)]
pub enum UploadsCmd {
    /// Upload an image; prints its URL
    Image { file: PathBuf },
    /// Upload an image and attach it to a post
    Attach {
        #[arg(long)]
        id: String,
        file: PathBuf,
    },
}
