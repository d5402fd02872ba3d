use crate::error::Result;
use crate::utils::format;

pub fn run() -> Result<()> {
    print!("{}", format::policy_table());
    Ok(())
}
