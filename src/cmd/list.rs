use crate::reports;
use clap::Args;
use loadforge::error::LfResult;
use loadforge::instances::{Category, InstanceRepository};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only show one category.
    #[arg(short, long)]
    pub category: Option<Category>,
}

pub fn run(args: ListArgs, repo: &InstanceRepository) -> LfResult<()> {
    let instances: Vec<_> = match args.category {
        Some(c) => repo.by_category(c).collect(),
        None => repo.iter().collect(),
    };
    reports::print_instance_table(&instances);
    Ok(())
}
