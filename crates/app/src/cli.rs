//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quill_domain::{ArticleQuery, ArticleSort, PageQuery, RegisterData};

#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Command-line client for the Quill publishing API")]
pub struct Cli {
    /// Configuration file (defaults to ./quill.toml when present).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// API origin, overriding configuration.
    #[arg(long, global = true, env = "QUILL_API_URL")]
    pub api_url: Option<String>,

    /// More logging (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the signed-in user.
    Whoami,
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Sign out and forget stored tokens.
    Logout,
    /// Exchange the refresh token for a new access token.
    Refresh,
    /// List articles.
    Articles(ArticleArgs),
    /// Show one article.
    Article { slug: String },
    /// Show a user's profile.
    Profile {
        username: String,
        /// Also list the user's articles.
        #[arg(long)]
        articles: bool,
    },
    /// List comments on an article.
    Comments {
        article_id: u64,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Follow a user.
    Follow { username: String },
    /// Stop following a user.
    Unfollow { username: String },
    /// Like an article.
    Like { article_id: u64 },
    /// Remove a like.
    Unlike { article_id: u64 },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub full_name: Option<String>,
}

impl From<RegisterArgs> for RegisterData {
    fn from(args: RegisterArgs) -> Self {
        Self {
            email: args.email,
            username: args.username,
            password: args.password,
            full_name: args.full_name,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ArticleArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub per_page: Option<u32>,
    #[arg(long, short = 's')]
    pub search: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Latest,
    Popular,
    Trending,
    Oldest,
}

impl From<SortArg> for ArticleSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Latest => Self::Latest,
            SortArg::Popular => Self::Popular,
            SortArg::Trending => Self::Trending,
            SortArg::Oldest => Self::Oldest,
        }
    }
}

impl From<ArticleArgs> for ArticleQuery {
    fn from(args: ArticleArgs) -> Self {
        Self {
            page: args.page,
            per_page: args.per_page,
            search: args.search,
            tag: args.tag,
            author: args.author,
            sort_by: args.sort.map(ArticleSort::from),
        }
    }
}

/// Page selection for nested listings.
pub fn page_query(page: Option<u32>) -> PageQuery {
    PageQuery {
        page,
        per_page: None,
    }
}
