use tracing::info;

use crate::{dir::Paths, profile_store::ProfileStore};

pub fn list_chained(paths: &Paths) -> anyhow::Result<()> {
    let store = ProfileStore::load(&paths.aws_config)?;
    let chained = store.chained_profiles();
    if chained.is_empty() {
        info!("No chained profile found in {}", paths.aws_config);
        return Ok(());
    }
    for profile in chained {
        let role_arn = profile.role_arn.as_deref().unwrap_or("-");
        println!("{} <- {} ({role_arn})", profile.name, profile.source_profile);
    }
    Ok(())
}
