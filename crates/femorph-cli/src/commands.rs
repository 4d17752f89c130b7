//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use femorph_core::TaskId;

/// Subcommands of the `femorph` client.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full morph workflow end to end and print PASS on success
    Run {
        /// FEM mesh to upload
        #[arg(long, default_value = "data/cube.cdb")]
        fem: PathBuf,
        /// Target surface to morph onto
        #[arg(long, default_value = "data/sphere.ply")]
        surface: PathBuf,
        /// Where to write the morphed node block
        #[arg(long, default_value = "/tmp/output.inp")]
        output: PathBuf,
        /// Delete the user's stored artifacts before uploading
        #[arg(long)]
        clear: bool,
    },

    /// Check that the service is up
    Health,

    /// Wait for an existing morph task to finish
    Watch {
        /// Task id returned when the morph was triggered
        #[arg(long)]
        task_id: TaskId,
    },

    /// Create another user, authorized by the configured account
    CreateUser {
        /// Email of the new user
        #[arg(long)]
        email: String,
        /// Password of the new user
        #[arg(long)]
        password: String,
    },
}
