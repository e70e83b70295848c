//! Wiring of the concrete adapters and command dispatch.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use quill_application::{
    ApiClient, CallSets, Navigator, Notification, Notifier, RequestExecutor, SessionController,
    TokenStore,
};
use quill_domain::{ClientConfig, EntityId, RegisterData};
use quill_infrastructure::{
    ChannelNotifier, FileCookieStorage, ReqwestHttpClient, TokioFileSystem, WatchNavigator,
    default_cookie_path,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::cli::{Command, page_query};
use crate::output;

type Storage = FileCookieStorage<TokioFileSystem>;

/// How long `logout` waits for the server after signing out locally.
const LOGOUT_GRACE: Duration = Duration::from_secs(5);

/// A connected client: one session, one set of calls, one notification feed.
pub struct App {
    session: SessionController<ReqwestHttpClient, Storage>,
    calls: CallSets<ReqwestHttpClient, Storage>,
    navigator: Arc<WatchNavigator>,
    notifications: UnboundedReceiver<Notification>,
}

impl App {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let cookie_path = config
            .cookie_file
            .clone()
            .or_else(default_cookie_path)
            .context("no configuration directory for the token file; set cookie_file")?;
        debug!(path = %cookie_path.display(), "using token file");

        let http = ReqwestHttpClient::new(&config.user_agent)?;
        let tokens = TokenStore::new(FileCookieStorage::new(TokioFileSystem, cookie_path));
        let api = ApiClient::new(http, tokens, config)?;

        let (notifier, notifications) = ChannelNotifier::channel();
        let notifier: Arc<dyn Notifier> = Arc::new(notifier);
        let navigator = Arc::new(WatchNavigator::new());

        let calls = CallSets::new(&api, &notifier);
        let session = SessionController::init(
            api,
            notifier,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );

        Ok(Self {
            session,
            calls,
            navigator,
            notifications,
        })
    }

    pub async fn run(mut self, command: Command) -> ExitCode {
        let ok = self.dispatch(command).await;
        self.flush_notifications();
        if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }

    async fn dispatch(&self, command: Command) -> bool {
        match command {
            Command::Whoami => {
                self.session.bootstrap().await;
                match self.session.session().user {
                    Some(user) => {
                        println!("{}", output::user(&user));
                        true
                    }
                    None => {
                        eprintln!("not signed in");
                        false
                    }
                }
            }
            Command::Login { email, password } => self.session.login(&email, &password).await,
            Command::Register(args) => {
                let data = RegisterData::from(args);
                self.session.register(&data).await
            }
            Command::Logout => {
                self.session.bootstrap().await;
                if timeout(LOGOUT_GRACE, self.session.logout()).await.is_err() {
                    debug!("server did not acknowledge logout in time");
                }
                true
            }
            Command::Refresh => self.session.refresh().await,
            Command::Articles(args) => {
                let call = self.calls.articles.list();
                self.show(&call, args.into(), output::articles).await
            }
            Command::Article { slug } => {
                let call = self.calls.articles.get();
                self.show(&call, slug, output::article).await
            }
            Command::Profile { username, articles } => {
                let call = self.calls.users.get();
                if !self.show(&call, username.clone(), output::user).await {
                    return false;
                }
                if articles {
                    let call = self.calls.users.articles();
                    return self
                        .show(&call, (username, page_query(None)), output::articles)
                        .await;
                }
                true
            }
            Command::Comments { article_id, page } => {
                let call = self.calls.comments.list();
                let input = (EntityId::from(article_id), page_query(page));
                self.show(&call, input, output::comments).await
            }
            Command::Follow { username } => {
                Self::perform(&self.calls.users.follow(), username).await
            }
            Command::Unfollow { username } => {
                Self::perform(&self.calls.users.unfollow(), username).await
            }
            Command::Like { article_id } => {
                Self::perform(&self.calls.likes.like(), EntityId::from(article_id)).await
            }
            Command::Unlike { article_id } => {
                Self::perform(&self.calls.likes.unlike(), EntityId::from(article_id)).await
            }
        }
    }

    /// Runs a read call and prints its payload, if any, or the error it stored.
    async fn show<I, T>(
        &self,
        call: &RequestExecutor<I, T>,
        input: I,
        render: impl Fn(&T) -> String,
    ) -> bool
    where
        I: Send + 'static,
        T: Clone + Send + Sync + 'static,
    {
        if let Some(data) = call.execute(input).await {
            println!("{}", render(&data));
            return true;
        }
        match call.outcome().error {
            Some(error) => {
                eprintln!("{}", output::error(&error));
                false
            }
            None => true,
        }
    }

    /// Runs a mutation; its notifications report the result.
    async fn perform<I, T>(call: &RequestExecutor<I, T>, input: I) -> bool
    where
        I: Send + 'static,
        T: Clone + Send + Sync + 'static,
    {
        call.execute(input).await;
        call.outcome().error.is_none()
    }

    fn flush_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            eprintln!("{}", output::notification(&notification));
        }
        let route = self.navigator.current();
        if route != "/" {
            info!(route = %route, "navigation requested");
        }
    }
}
