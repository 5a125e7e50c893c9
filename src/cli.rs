use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::model::MovieId;

#[derive(Parser, Debug)]
#[command(
    name = "seedrec",
    version,
    about = "Seed-based movie recommendations from precomputed similarity lists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Import(ImportArgs),
    Start(StartArgs),
    Select(SelectArgs),
    Recommend(RecommendArgs),
    Toplist(TopListArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long, default_value = ".cache/seedrec")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

impl StoreArgs {
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.cache_root.join("seedrec.sqlite"))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub similarity: PathBuf,

    #[arg(long)]
    pub top_list: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub user_id: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub user_id: i64,

    #[arg(long = "movie", required = true)]
    pub movies: Vec<MovieId>,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub user_id: i64,

    #[arg(long = "movie")]
    pub movies: Vec<MovieId>,

    #[arg(
        long,
        default_value_t = 12,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=12)
    )]
    pub limit: usize,

    #[arg(
        long,
        default_value_t = 25,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=25)
    )]
    pub max_seeds: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TopListArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}
