//! Channel command

use anyhow::Result;
use umbase_schema::Channel;

/// Print the channel `ref_name` exports to.
pub fn channel(ref_name: &str) -> Result<()> {
    println!("{}", Channel::from_ref_name(ref_name));
    Ok(())
}
