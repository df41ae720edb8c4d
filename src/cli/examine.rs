//! `pmap examine` — print index header/summary statistics, the way
//! `piscem`'s own subcommands report the index they just loaded.

use crate::cli::IndexArg;
use crate::index::SparseIndex;
use anyhow::Result;
use tracing::info;

#[derive(Debug, clap::Args)]
pub struct ExamineOpts {
    #[command(flatten)]
    pub index_arg: IndexArg,
}

pub fn run(opts: ExamineOpts) -> Result<()> {
    let index = SparseIndex::load(&opts.index_arg.index)?;
    info!(k = index.k(), num_refs = index.num_refs(), "index loaded");

    println!("k                  : {}", index.k());
    println!("num references     : {}", index.num_refs());
    for ref_id in 0..index.num_refs() as u32 {
        println!(
            "  ref[{ref_id}]: {} ({} bp)",
            index.ref_name(ref_id),
            index.ref_len(ref_id)
        );
    }
    Ok(())
}
