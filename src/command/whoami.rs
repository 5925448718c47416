use crate::{args::Whoami, aws};

pub fn whoami(args: &Whoami) -> anyhow::Result<()> {
    let identity = aws::caller_identity(&args.profile)?;
    println!("Profile: {}", args.profile);
    println!("Account: {}", identity.account);
    println!("Arn:     {}", identity.arn);
    println!("UserId:  {}", identity.user_id);
    Ok(())
}
