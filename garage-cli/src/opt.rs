use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "garage", about = "Vehicle management dashboard client")]
pub struct Opt {
    /// Config file path
    #[arg(short, long, default_value = "garage.toml")]
    pub config: clio::Input,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in, storing the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Terminates the stored session
    Logout,
    /// Prints the stored session
    Status,
    /// Creates a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        document: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirmation: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Requests a password recovery e-mail
    RecoverPassword {
        #[arg(long)]
        email: String,
    },
    /// Sets a new password with a recovery link
    ResetPassword {
        /// Link from the recovery e-mail, or its `/recover-password?token=...` path
        link: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirmation: String,
    },
    /// Navigates to a path and prints the screen with its data
    Open {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Creates a resource from a JSON file
    Add {
        resource: Resource,
        /// JSON body, `-` for stdin
        #[arg(default_value = "-")]
        file: clio::Input,
    },
    /// Updates a resource from a JSON file
    Update {
        resource: Resource,
        id: String,
        /// JSON body, `-` for stdin
        #[arg(default_value = "-")]
        file: clio::Input,
    },
    /// Deletes a resource
    Delete { resource: Resource, id: String },
}

/// Resources managed through the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Vehicle,
    Refill,
    Maintenance,
    Service,
    Document,
    /// Profile of the logged in user, the id is ignored
    Profile,
}
