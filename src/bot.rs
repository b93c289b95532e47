//! Bot service — applies conversation logic to webhook events.
//!
//! Built once in `main` and shared with the HTTP handlers.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::JobCatalog;
use crate::config::BotMode;
use crate::conversation::{COMMAND_MENU, Command, Effect, Input, Reply, step};
use crate::error::Result;
use crate::formatter::{self, RandomScore, ScoreSource};
use crate::line::{Event, Message, MessagingApi};
use crate::store::{UserRecord, UserStore};

/// Handles one webhook event at a time.
pub struct BotService {
    mode: BotMode,
    store: Arc<dyn UserStore>,
    catalog: Arc<JobCatalog>,
    messaging: Arc<dyn MessagingApi>,
    scores: Arc<dyn ScoreSource>,
    public_url: Option<String>,
}

impl BotService {
    pub fn new(
        mode: BotMode,
        store: Arc<dyn UserStore>,
        catalog: Arc<JobCatalog>,
        messaging: Arc<dyn MessagingApi>,
    ) -> Self {
        Self {
            mode,
            store,
            catalog,
            messaging,
            scores: Arc::new(RandomScore::from_entropy()),
            public_url: None,
        }
    }

    /// Replace the detail-page score source.
    pub fn with_scores(mut self, scores: Arc<dyn ScoreSource>) -> Self {
        self.scores = scores;
        self
    }

    /// Base URL used for detail links in carousels.
    pub fn with_public_url(mut self, public_url: Option<String>) -> Self {
        self.public_url = public_url;
        self
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    /// Detail page HTML for a raw index, or the fallback string.
    pub fn detail_page(&self, raw_index: &str) -> String {
        formatter::render_detail(&self.catalog, raw_index, self.scores.as_ref())
    }

    /// Process one webhook event and send the reply, if any.
    pub async fn handle_event(&self, event: &Event) -> Result<()> {
        if let Event::Unfollow { .. } = event {
            if let (BotMode::Conversation, Some(user_id)) = (self.mode, event.user_id()) {
                let removed = self.store.delete_user(user_id).await?;
                info!(user_id = %user_id, removed, "User unfollowed, profile removed");
            }
            return Ok(());
        }

        let (Some(reply_token), Some(input)) = (event.reply_token(), event.input()) else {
            debug!(kind = event.kind(), "Ignoring event without reply");
            return Ok(());
        };

        let reply = match self.mode {
            BotMode::Commands => Some(self.command_reply(&input)),
            BotMode::Conversation => match event.user_id() {
                Some(user_id) => self.converse(user_id, input).await?,
                None => {
                    debug!(kind = event.kind(), "Ignoring event without a user id");
                    None
                }
            },
        };

        if let Some(message) = reply {
            self.messaging.reply(reply_token, vec![message]).await?;
        }
        Ok(())
    }

    /// Stateless command bot: map a text message to its reply. Anything
    /// that is not a recognised command gets the command menu.
    pub fn command_reply(&self, input: &Input) -> Message {
        let Input::Text(text) = input else {
            return Message::text(COMMAND_MENU);
        };

        match Command::parse(text) {
            Command::Echo(rest) => Message::text(format!("You said: {rest}")),
            Command::JobTable => formatter::job_table(self.catalog.jobs()),
            Command::JobCarousel => {
                formatter::job_carousel(self.catalog.jobs(), self.public_url.as_deref())
            }
            Command::Menu => Message::text(COMMAND_MENU),
        }
    }

    /// Stateful bot: advance the user's conversation by one input and return
    /// the reply. New users get a fresh record.
    pub async fn converse(&self, user_id: &str, input: Input) -> Result<Option<Message>> {
        let mut user = match self.store.get_user(user_id).await? {
            Some(user) => user,
            None => {
                info!(user_id = %user_id, "New user");
                UserRecord::new(user_id)
            }
        };

        let previous = user.state;
        let transition = step(previous, &input);

        match transition.effect {
            Some(Effect::DeleteUser) => {
                self.store.delete_user(user_id).await?;
                info!(user_id = %user_id, "Profile deleted on request");
            }
            effect => {
                match effect {
                    Some(Effect::SetName(name)) => user.name = name,
                    Some(Effect::SetJob(job)) => user.job = job,
                    _ => {}
                }
                user.state = transition.next;
                user = self.store.upsert_user(&user).await?;
                info!(
                    user_id = %user_id,
                    from = %previous,
                    to = %user.state,
                    "Conversation advanced"
                );
            }
        }

        Ok(transition.reply.map(|reply| self.render(reply, &user)))
    }

    fn render(&self, reply: Reply, user: &UserRecord) -> Message {
        match reply {
            Reply::Text(text) => Message::text(text),
            Reply::Menu => formatter::menu(user),
            Reply::JobCarousel => {
                formatter::job_carousel(self.catalog.jobs(), self.public_url.as_deref())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::conversation::ConversationState;
    use crate::conversation::machine::{ASK_JOB_PROMPT, ASK_NAME_PROMPT, PROFILE_DELETED};
    use crate::error::ChannelError;
    use crate::formatter::FixedScore;
    use crate::line::message::Template;
    use crate::store::LibSqlBackend;

    /// Messaging stub that records every reply.
    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub sent: Mutex<Vec<(String, Vec<Message>)>>,
    }

    #[async_trait]
    impl MessagingApi for RecordingApi {
        async fn reply(
            &self,
            reply_token: &str,
            messages: Vec<Message>,
        ) -> std::result::Result<(), ChannelError> {
            self.sent
                .lock()
                .await
                .push((reply_token.to_string(), messages));
            Ok(())
        }
    }

    async fn service(mode: BotMode) -> (BotService, Arc<LibSqlBackend>, Arc<RecordingApi>) {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let api = Arc::new(RecordingApi::default());
        let bot = BotService::new(
            mode,
            store.clone(),
            Arc::new(sample_catalog()),
            api.clone(),
        )
        .with_scores(Arc::new(FixedScore(75)));
        (bot, store, api)
    }

    fn say(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    fn text_event(user_id: &str, text: &str) -> Event {
        serde_json::from_value(serde_json::json!({
            "type": "message",
            "replyToken": format!("rt-{text}"),
            "source": {"type": "user", "userId": user_id},
            "message": {"type": "text", "id": "1", "text": text}
        }))
        .unwrap()
    }

    fn postback_event(user_id: &str, data: &str) -> Event {
        serde_json::from_value(serde_json::json!({
            "type": "postback",
            "replyToken": format!("rt-{data}"),
            "source": {"type": "user", "userId": user_id},
            "postback": {"data": data}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn first_contact_creates_empty_record_and_asks_name() {
        let (bot, store, _) = service(BotMode::Conversation).await;

        let reply = bot.converse("U1", say("hello")).await.unwrap();
        assert_eq!(reply, Some(Message::text(ASK_NAME_PROMPT)));

        let user = store.get_user("U1").await.unwrap().unwrap();
        assert_eq!(user.state, ConversationState::ProcessName);
        assert_eq!(user.name, "");
        assert_eq!(user.job, "");
    }

    #[tokio::test]
    async fn onboarding_round_trips_name_and_job_into_menu() {
        let (bot, store, _) = service(BotMode::Conversation).await;

        bot.converse("U1", say("hi")).await.unwrap();
        let reply = bot.converse("U1", say("Aiko")).await.unwrap();
        assert_eq!(reply, Some(Message::text(ASK_JOB_PROMPT)));

        let reply = bot.converse("U1", say("Data Analyst")).await.unwrap().unwrap();
        match reply {
            Message::Template {
                template: Template::Buttons { title, text, .. },
                ..
            } => {
                assert_eq!(title.as_deref(), Some("Aiko"));
                assert_eq!(text, "Looking for: Data Analyst");
            }
            other => panic!("expected menu, got {other:?}"),
        }

        let user = store.get_user("U1").await.unwrap().unwrap();
        assert_eq!(user.name, "Aiko");
        assert_eq!(user.job, "Data Analyst");
        assert_eq!(user.state, ConversationState::DisplayMenu);
    }

    #[tokio::test]
    async fn delete_then_next_event_starts_over() {
        let (bot, store, _) = service(BotMode::Conversation).await;
        for text in ["hi", "Aiko", "Chef"] {
            bot.converse("U1", say(text)).await.unwrap();
        }

        let reply = bot
            .converse("U1", Input::Postback("option4".into()))
            .await
            .unwrap();
        assert_eq!(reply, Some(Message::text(PROFILE_DELETED)));
        assert!(store.get_user("U1").await.unwrap().is_none());

        let reply = bot.converse("U1", say("back again")).await.unwrap();
        assert_eq!(reply, Some(Message::text(ASK_NAME_PROMPT)));
        let user = store.get_user("U1").await.unwrap().unwrap();
        assert_eq!(user.state, ConversationState::ProcessName);
        assert_eq!(user.name, "");
    }

    #[tokio::test]
    async fn edit_details_keeps_old_values_until_replaced() {
        let (bot, store, _) = service(BotMode::Conversation).await;
        for text in ["hi", "Aiko", "Chef"] {
            bot.converse("U1", say(text)).await.unwrap();
        }

        bot.converse("U1", Input::Postback("option3".into()))
            .await
            .unwrap();
        let user = store.get_user("U1").await.unwrap().unwrap();
        assert_eq!(user.state, ConversationState::ProcessName);
        assert_eq!(user.name, "Aiko");

        bot.converse("U1", say("Aiko T")).await.unwrap();
        bot.converse("U1", say("Sous Chef")).await.unwrap();
        let user = store.get_user("U1").await.unwrap().unwrap();
        assert_eq!((user.name.as_str(), user.job.as_str()), ("Aiko T", "Sous Chef"));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn handle_event_replies_with_token() {
        let (bot, _, api) = service(BotMode::Conversation).await;
        bot.handle_event(&text_event("U1", "hi")).await.unwrap();

        let sent = api.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "rt-hi");
        assert_eq!(sent[0].1, vec![Message::text(ASK_NAME_PROMPT)]);
    }

    #[tokio::test]
    async fn listings_postback_sends_carousel() {
        let (bot, _, api) = service(BotMode::Conversation).await;
        for text in ["hi", "Aiko", "Chef"] {
            bot.handle_event(&text_event("U1", text)).await.unwrap();
        }
        bot.handle_event(&postback_event("U1", "option1"))
            .await
            .unwrap();

        let sent = api.sent.lock().await;
        let (token, messages) = sent.last().unwrap();
        assert_eq!(token, "rt-option1");
        let value = serde_json::to_value(&messages[0]).unwrap();
        assert_eq!(value["contents"]["type"], "carousel");
    }

    #[tokio::test]
    async fn unfollow_removes_profile_without_reply() {
        let (bot, store, api) = service(BotMode::Conversation).await;
        bot.handle_event(&text_event("U1", "hi")).await.unwrap();

        let unfollow: Event = serde_json::from_value(serde_json::json!({
            "type": "unfollow",
            "source": {"type": "user", "userId": "U1"}
        }))
        .unwrap();
        bot.handle_event(&unfollow).await.unwrap();

        assert!(store.get_user("U1").await.unwrap().is_none());
        assert_eq!(api.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn command_mode_echo_and_tables() {
        let (bot, store, api) = service(BotMode::Commands).await;

        bot.handle_event(&text_event("U1", "/echo hello")).await.unwrap();
        bot.handle_event(&text_event("U1", "/1")).await.unwrap();
        bot.handle_event(&text_event("U1", "what?")).await.unwrap();

        let sent = api.sent.lock().await;
        assert_eq!(sent[0].1, vec![Message::text("You said: hello")]);

        let table = serde_json::to_value(&sent[1].1[0]).unwrap();
        let rows = table["contents"]["body"]["contents"].as_array().unwrap();
        assert_eq!(rows.len(), 2 + bot.catalog().len());

        assert_eq!(sent[2].1, vec![Message::text(COMMAND_MENU)]);

        // Command mode never touches the store.
        assert_eq!(store.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn command_mode_answers_postbacks_with_menu() {
        let (bot, store, api) = service(BotMode::Commands).await;
        bot.handle_event(&postback_event("U1", "option1"))
            .await
            .unwrap();
        assert_eq!(
            api.sent.lock().await[0].1,
            vec![Message::text(COMMAND_MENU)]
        );
        assert_eq!(store.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn detail_page_uses_injected_score() {
        let (bot, _, _) = service(BotMode::Conversation).await;
        let html = bot.detail_page("0");
        assert!(html.contains("<span class=\"score\">75</span>"));
        assert_eq!(bot.detail_page("7"), formatter::NOTHING_TO_SEE);
    }
}
