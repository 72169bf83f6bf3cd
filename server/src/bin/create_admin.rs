//! Bootstrap an admin account from the command line.
//!
//! Usage: create-admin <username> <password>

use tracing_subscriber::EnvFilter;

use keepsake_db::password::hash_password;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: create-admin <username> <password>");
    };
    let username = username.trim().to_string();
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("username and password must not be empty");
    }

    let (db, _config, _dir) = keepsake_server::init_foundation()?;

    let password_hash = hash_password(&password);
    let id = db.create_admin(&username, &password_hash)?;

    println!("Admin created: {username} (id {id})");
    Ok(())
}
