//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. This is the single source of truth
//! for how events modify state.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use wren_core::gate::{self, Destination};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::feed::update as feed_update;
use crate::features::feed::update::{ComposerAction, DeleteOutcome, SubmitOutcome};
use crate::overlays::{ConfirmState, Overlay, OverlayTransition, SignInState};
use crate::state::{AppState, Notice, TuiState};

/// Effects to run before the first frame: resolve the stored credential
/// and fetch the feed.
pub fn bootstrap(tui: &mut TuiState) -> Vec<UiEffect> {
    vec![
        UiEffect::ResolveSession {
            task: tui.task_seq.next_id(),
        },
        UiEffect::LoadFeed {
            task: tui.task_seq.next_id(),
        },
    ]
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick | UiEvent::Frame { .. } | UiEvent::FeedLoadAborted => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),

        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app
                .tui
                .tasks
                .state_mut(kind)
                .finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // Stale or cancelled; the result must not touch state.
                vec![]
            }
        }

        UiEvent::SessionResolved { session } => {
            app.tui.session = session;
            app.tui.nav.on_session_changed(&app.tui.session);
            vec![]
        }

        UiEvent::FeedLoaded { result } => {
            match result {
                Ok(posts) => app.tui.feed.replace_posts(posts),
                Err(err) => {
                    app.tui.notice = Some(Notice::error(format!("Could not load feed: {err}")));
                }
            }
            vec![]
        }

        UiEvent::PostCreated { result } => match result {
            Ok(()) => {
                // Server confirmed; only now does the draft go away. The
                // authoritative refetch replaces any speculative view.
                app.tui.feed.draft.clear();
                app.tui.feed.composer = None;
                app.tui.notice = Some(Notice::info("Posted."));
                vec![UiEffect::LoadFeed {
                    task: app.tui.task_seq.next_id(),
                }]
            }
            Err(err) => {
                app.tui.notice = Some(Notice::error(format!("Post failed: {err}")));
                remote_failure_effects(app, err.is_unauthorized())
            }
        },

        UiEvent::PostDeleted { result } => match result {
            Ok(()) => {
                app.tui.notice = Some(Notice::info("Post deleted."));
                vec![UiEffect::LoadFeed {
                    task: app.tui.task_seq.next_id(),
                }]
            }
            Err(err) => {
                app.tui.notice = Some(Notice::error(format!("Delete failed: {err}")));
                remote_failure_effects(app, err.is_unauthorized())
            }
        },

        UiEvent::LoginCompleted { result } => match result {
            Ok(token) => {
                app.overlay = None;
                app.tui.notice = Some(Notice::info("Signed in."));
                vec![
                    UiEffect::SaveCredential { token },
                    UiEffect::ResolveSession {
                        task: app.tui.task_seq.next_id(),
                    },
                ]
            }
            Err(err) => {
                if let Some(Overlay::SignIn(signin)) = &mut app.overlay {
                    signin.on_failed(login_error_text(&err));
                } else {
                    app.tui.notice = Some(Notice::error(format!("Sign-in failed: {err}")));
                }
                vec![]
            }
        },

        UiEvent::RegisterCompleted { result } => {
            if let Some(Overlay::SignIn(signin)) = &mut app.overlay {
                match result {
                    Ok(message) => {
                        let message = if message.is_empty() {
                            "Account created. Sign in to continue.".to_string()
                        } else {
                            message
                        };
                        signin.on_registered(message);
                    }
                    Err(err) => signin.on_failed(err.to_string()),
                }
            }
            vec![]
        }

        UiEvent::AccountDeleted { result } => match result {
            Ok(()) => {
                app.tui.notice = Some(Notice::info("Account deleted."));
                vec![
                    UiEffect::ClearCredential,
                    UiEffect::ResolveSession {
                        task: app.tui.task_seq.next_id(),
                    },
                ]
            }
            Err(err) => {
                app.tui.notice = Some(Notice::error(format!("Account deletion failed: {err}")));
                vec![]
            }
        },
    }
}

/// A rejected credential means the session is no longer what the UI
/// believes; re-resolve so gating catches up.
fn remote_failure_effects(app: &mut AppState, unauthorized: bool) -> Vec<UiEffect> {
    if unauthorized {
        vec![UiEffect::ResolveSession {
            task: app.tui.task_seq.next_id(),
        }]
    } else {
        vec![]
    }
}

fn login_error_text(err: &wren_core::error::ApiError) -> String {
    if err.is_unauthorized() {
        "Invalid username or password.".to_string()
    } else {
        err.to_string()
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(&mut app.tui, &mouse),
        Event::Resize(..) => {
            app.tui.layout.on_terminal_resize();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C quits from anywhere, overlay or not.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    // An open overlay owns the keyboard.
    if let Some(mut overlay) = app.overlay.take() {
        let result = overlay.handle_key(&mut app.tui, key);
        if matches!(result.transition, OverlayTransition::Stay) {
            app.overlay = Some(overlay);
        }
        return result.effects;
    }

    if app.tui.feed.is_composing() && is_feed_view(app.tui.nav.selected) {
        return handle_composer_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Esc => {
            app.tui.notice = None;
            vec![]
        }
        KeyCode::Tab => navigate(app, 1),
        KeyCode::BackTab => navigate(app, -1),
        _ => handle_view_key(app, key),
    }
}

fn handle_composer_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match feed_update::handle_composer_key(&mut app.tui.feed, key) {
        Some(ComposerAction::Submit) => {
            match feed_update::submit_draft(&app.tui.session, &app.tui.feed.draft) {
                SubmitOutcome::Submit { message, hashtags } => vec![UiEffect::CreatePost {
                    task: app.tui.task_seq.next_id(),
                    message,
                    hashtags,
                }],
                SubmitOutcome::NeedsSignIn => {
                    app.overlay = Some(Overlay::SignIn(SignInState::new()));
                    vec![]
                }
                SubmitOutcome::Invalid(err) => {
                    app.tui.notice = Some(Notice::error(err.to_string()));
                    vec![]
                }
            }
        }
        Some(ComposerAction::StageHashtag) => {
            if let Err(err) = app.tui.feed.draft.stage_hashtag() {
                app.tui.notice = Some(Notice::error(err.to_string()));
            }
            vec![]
        }
        None => vec![],
    }
}

fn handle_view_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match app.tui.nav.selected {
        Destination::Home | Destination::Profile => handle_feed_key(app, key),
        Destination::Settings => handle_settings_key(app, key),
        Destination::Notifications | Destination::AdminStats | Destination::AdminInfo => vec![],
    }
}

fn handle_feed_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('r') => vec![UiEffect::LoadFeed {
            task: app.tui.task_seq.next_id(),
        }],
        KeyCode::Char('n') => {
            if gate::check_create(&app.tui.session).is_ok() {
                app.tui.feed.open_composer();
            } else {
                app.overlay = Some(Overlay::SignIn(SignInState::new()));
            }
            vec![]
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.tui.feed.select_next();
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tui.feed.select_prev();
            vec![]
        }
        KeyCode::Char('d') => {
            let filter = (app.tui.nav.selected == Destination::Profile)
                .then(|| app.tui.session.username.clone())
                .flatten();
            match feed_update::request_delete(&app.tui.session, &app.tui.feed, filter.as_deref()) {
                DeleteOutcome::Confirm { id } => {
                    let author = app
                        .tui
                        .feed
                        .selected_post()
                        .map(|p| p.username.clone())
                        .unwrap_or_default();
                    app.overlay = Some(Overlay::Confirm(ConfirmState::delete_post(id, &author)));
                }
                DeleteOutcome::Denied(err) => {
                    app.tui.notice = Some(Notice::error(err.to_string()));
                }
                DeleteOutcome::Nothing => {}
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_settings_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('l') => {
            if app.tui.session.is_authenticated() {
                app.tui.notice = Some(Notice::info("Signed out."));
                vec![
                    UiEffect::ClearCredential,
                    UiEffect::ResolveSession {
                        task: app.tui.task_seq.next_id(),
                    },
                ]
            } else {
                app.overlay = Some(Overlay::SignIn(SignInState::new()));
                vec![]
            }
        }
        KeyCode::Char('x') => {
            if let Some(username) = app.tui.session.username.clone() {
                app.overlay = Some(Overlay::Confirm(ConfirmState::delete_account(&username)));
            } else {
                app.tui.notice = Some(Notice::error("Sign in first."));
            }
            vec![]
        }
        _ => vec![],
    }
}

fn is_feed_view(destination: Destination) -> bool {
    matches!(destination, Destination::Home | Destination::Profile)
}

/// Moves the sidebar selection. Leaving the feed view cancels an
/// in-flight load so a late response cannot touch state the view no
/// longer shows; entering it issues a fresh load.
fn navigate(app: &mut AppState, direction: isize) -> Vec<UiEffect> {
    let was_feed = is_feed_view(app.tui.nav.selected);
    if direction >= 0 {
        app.tui.nav.select_next(&app.tui.session);
    } else {
        app.tui.nav.select_prev(&app.tui.session);
    }
    let is_feed = is_feed_view(app.tui.nav.selected);

    if was_feed && !is_feed && app.tui.tasks.feed_load.is_running() {
        let token = app.tui.tasks.feed_load.cancel.clone();
        app.tui.tasks.feed_load.clear();
        return vec![UiEffect::CancelTask {
            kind: TaskKind::FeedLoad,
            token,
        }];
    }
    if !was_feed && is_feed {
        return vec![UiEffect::LoadFeed {
            task: app.tui.task_seq.next_id(),
        }];
    }
    vec![]
}

fn handle_mouse(tui: &mut TuiState, mouse: &MouseEvent) -> Vec<UiEffect> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(divider_x) = tui.divider_x.get() {
                tui.layout.on_mouse_down(mouse.column, divider_x);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            tui.layout.on_mouse_drag(mouse.column);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            tui.layout.on_mouse_up();
        }
        _ => {}
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use wren_core::api::types::Post;
    use wren_core::config::Config;
    use wren_core::session::{Role, Session};

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn app_with_session(role: Role) -> AppState {
        let mut app = app();
        app.tui.session = Session {
            username: (role != Role::Guest).then(|| "alice".to_string()),
            role,
        };
        app
    }

    fn posts(ids: &[u64]) -> Vec<Post> {
        ids.iter()
            .map(|id| Post {
                id: *id,
                message: format!("post {id}"),
                hashtags: vec![],
                username: "alice".to_string(),
                timestamp: String::new(),
            })
            .collect()
    }

    fn start_task(app: &mut AppState, kind: TaskKind, id: u64) {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted {
                    id: TaskId(id),
                    cancel: None,
                },
            },
        );
    }

    fn complete_task(app: &mut AppState, kind: TaskKind, id: u64, inner: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id: TaskId(id),
                    result: Box::new(inner),
                },
            },
        )
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(app, UiEvent::Terminal(Event::Key(KeyEvent::from(code))))
    }

    #[test]
    fn test_last_issued_feed_load_wins() {
        let mut app = app();
        start_task(&mut app, TaskKind::FeedLoad, 0);
        start_task(&mut app, TaskKind::FeedLoad, 1);

        // The first-issued load resolves last-but-one; the second is the
        // active one. Deliver the second's result first.
        complete_task(
            &mut app,
            TaskKind::FeedLoad,
            1,
            UiEvent::FeedLoaded {
                result: Ok(posts(&[10, 11])),
            },
        );
        assert_eq!(app.tui.feed.posts.len(), 2);

        // The stale first response then arrives and must be dropped.
        complete_task(
            &mut app,
            TaskKind::FeedLoad,
            0,
            UiEvent::FeedLoaded {
                result: Ok(posts(&[99])),
            },
        );
        assert_eq!(app.tui.feed.posts.len(), 2);
        assert_eq!(app.tui.feed.posts[0].id, 10);
    }

    #[test]
    fn test_guest_submit_opens_sign_in_with_no_network_effect() {
        let mut app = app();
        app.tui.feed.open_composer();
        app.tui.feed.draft.message = "hello".to_string();

        let effects = press(&mut app, KeyCode::Enter);

        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::SignIn(_))));
        assert_eq!(app.tui.feed.draft.message, "hello");
    }

    #[test]
    fn test_create_success_clears_draft_and_refetches() {
        let mut app = app_with_session(Role::User);
        app.tui.feed.open_composer();
        app.tui.feed.draft.message = "hello".to_string();

        start_task(&mut app, TaskKind::PostCreate, 0);
        let effects = complete_task(
            &mut app,
            TaskKind::PostCreate,
            0,
            UiEvent::PostCreated { result: Ok(()) },
        );

        assert!(app.tui.feed.draft.is_empty());
        assert!(!app.tui.feed.is_composing());
        assert!(matches!(effects.as_slice(), [UiEffect::LoadFeed { .. }]));
    }

    #[test]
    fn test_create_failure_keeps_draft() {
        let mut app = app_with_session(Role::User);
        app.tui.feed.open_composer();
        app.tui.feed.draft.message = "hello".to_string();

        start_task(&mut app, TaskKind::PostCreate, 0);
        complete_task(
            &mut app,
            TaskKind::PostCreate,
            0,
            UiEvent::PostCreated {
                result: Err(wren_core::error::ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                }),
            },
        );

        assert_eq!(app.tui.feed.draft.message, "hello");
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn test_user_role_delete_is_denied_locally() {
        let mut app = app_with_session(Role::User);
        app.tui.feed.replace_posts(posts(&[7]));

        let effects = press(&mut app, KeyCode::Char('d'));

        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.feed.posts.len(), 1);
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn test_moderator_delete_asks_confirmation_then_refetches() {
        let mut app = app_with_session(Role::Moderator);
        app.tui.feed.replace_posts(posts(&[7]));

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.overlay, Some(Overlay::Confirm(_))));

        let effects = press(&mut app, KeyCode::Char('y'));
        assert!(app.overlay.is_none());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::DeletePost { id: 7, .. }]
        ));
    }

    #[test]
    fn test_profile_view_delete_ignores_hidden_selection() {
        let mut app = app_with_session(Role::Moderator);
        app.tui.nav.selected = Destination::Profile;
        // The only post is bob's; the Profile view (alice's) hides it.
        app.tui.feed.replace_posts(vec![Post {
            id: 7,
            message: "post 7".to_string(),
            hashtags: vec![],
            username: "bob".to_string(),
            timestamp: String::new(),
        }]);

        let effects = press(&mut app, KeyCode::Char('d'));

        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_logout_clears_credential_and_reresolves() {
        let mut app = app_with_session(Role::User);
        app.tui.nav.selected = Destination::Settings;

        let effects = press(&mut app, KeyCode::Char('l'));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ClearCredential, UiEffect::ResolveSession { .. }]
        ));
    }

    #[test]
    fn test_session_downgrade_leaves_admin_view() {
        let mut app = app_with_session(Role::Admin);
        app.tui.nav.selected = Destination::AdminStats;

        update(
            &mut app,
            UiEvent::SessionResolved {
                session: Session::guest(),
            },
        );

        assert_eq!(app.tui.nav.selected, Destination::Home);
    }

    #[test]
    fn test_navigating_away_cancels_feed_load() {
        let mut app = app();
        start_task(&mut app, TaskKind::FeedLoad, 0);

        // Home -> Notifications leaves the feed view.
        let effects = press(&mut app, KeyCode::Tab);

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::FeedLoad,
                ..
            }]
        ));
        assert!(!app.tui.tasks.feed_load.is_running());

        // The abandoned completion is dropped.
        complete_task(
            &mut app,
            TaskKind::FeedLoad,
            0,
            UiEvent::FeedLoaded {
                result: Ok(posts(&[1])),
            },
        );
        assert!(app.tui.feed.posts.is_empty());
    }

    #[test]
    fn test_load_issued_and_navigate_in_same_batch_cancels() {
        use tokio_util::sync::CancellationToken;

        let mut app = app();
        let effects = press(&mut app, KeyCode::Char('r'));
        let [UiEffect::LoadFeed { task }] = effects.as_slice() else {
            panic!("expected a single LoadFeed effect, got {effects:?}");
        };

        // The runtime applies the started event synchronously while
        // executing the effect, before any later event in the batch.
        let token = CancellationToken::new();
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::FeedLoad,
                started: TaskStarted {
                    id: *task,
                    cancel: Some(token.clone()),
                },
            },
        );

        // The very next event navigates away; the cancellation must
        // carry the live token.
        let effects = press(&mut app, KeyCode::Tab);
        match effects.as_slice() {
            [UiEffect::CancelTask {
                kind: TaskKind::FeedLoad,
                token: Some(t),
            }] => {
                t.cancel();
                assert!(token.is_cancelled());
            }
            other => panic!("expected CancelTask with a token, got {other:?}"),
        }
    }

    #[test]
    fn test_divider_drag_resizes_pane() {
        let mut app = app();
        let start = app.tui.layout.pane_width();
        app.tui.divider_x.set(Some(80));

        let mouse = |kind, column| {
            UiEvent::Terminal(Event::Mouse(MouseEvent {
                kind,
                column,
                row: 5,
                modifiers: KeyModifiers::NONE,
            }))
        };

        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 80));
        assert!(app.tui.layout.is_dragging());
        update(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 75));
        assert_eq!(app.tui.layout.pane_width(), start + 5);
        update(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 30));
        assert!(!app.tui.layout.is_dragging());
    }

    #[test]
    fn test_unauthorized_create_triggers_session_reresolution() {
        let mut app = app_with_session(Role::User);
        start_task(&mut app, TaskKind::PostCreate, 0);
        let effects = complete_task(
            &mut app,
            TaskKind::PostCreate,
            0,
            UiEvent::PostCreated {
                result: Err(wren_core::error::ApiError::Unauthorized { status: 401 }),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ResolveSession { .. }]
        ));
    }
}
