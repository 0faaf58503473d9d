//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vox_types::{NewOption, NewPoll};

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::state::{
    AppState, AuthFocus, AuthFormState, CreateFocus, CreatePollState, DetailPhase, DetailReady,
    PollDetailState, PollListState, Screen,
};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Api(api_event) => handle_api_event(app, api_event),
    }
}

/// Replaces the screen with a freshly loading poll list.
fn goto_list(app: &mut AppState) -> Vec<UiEffect> {
    app.screen = Screen::PollList(PollListState::loading());
    vec![UiEffect::FetchPolls]
}

/// Replaces the screen with a freshly loading poll detail.
fn goto_detail(app: &mut AppState, poll_id: i64) -> Vec<UiEffect> {
    app.screen = Screen::PollDetail(PollDetailState::loading(poll_id));
    vec![UiEffect::FetchPollDetail { poll_id }]
}

// ============================================================================
// Terminal events
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    // Ctrl+C quits from any screen.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match &app.screen {
        Screen::PollList(_) => handle_list_key(app, key),
        Screen::PollDetail(_) => handle_detail_key(app, key),
        Screen::CreatePoll(_) => handle_create_key(app, key),
        Screen::Login(_) | Screen::Register(_) => handle_auth_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Screen::PollList(list) = &mut app.screen else {
        return vec![];
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            list.selected = list.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if list.selected + 1 < list.polls.len() {
                list.selected += 1;
            }
            vec![]
        }
        KeyCode::Enter => match list.polls.get(list.selected) {
            Some(poll) => {
                let poll_id = poll.id;
                goto_detail(app, poll_id)
            }
            None => vec![],
        },
        KeyCode::Char('g') => {
            list.polls.clear();
            list.loading = true;
            list.selected = 0;
            vec![UiEffect::FetchPolls]
        }
        KeyCode::Char('n') => {
            // Creating a poll requires a session; send the user to login first.
            if app.user.is_some() {
                app.screen = Screen::CreatePoll(CreatePollState::new());
            } else {
                app.screen = Screen::Login(AuthFormState::default());
            }
            vec![]
        }
        KeyCode::Char('l') if app.user.is_none() => {
            app.screen = Screen::Login(AuthFormState::default());
            vec![]
        }
        KeyCode::Char('r') if app.user.is_none() => {
            app.screen = Screen::Register(AuthFormState::default());
            vec![]
        }
        KeyCode::Char('o') if app.user.is_some() => vec![UiEffect::Logout],
        _ => vec![],
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Screen::PollDetail(detail) = &mut app.screen else {
        return vec![];
    };

    match key.code {
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Esc | KeyCode::Char('b') => return goto_list(app),
        _ => {}
    }

    // Voting keys only apply once the poll is loaded and the user is
    // signed in.
    let signed_in = app.user.is_some();
    let poll_id = detail.poll_id;
    let DetailPhase::Ready(ready) = &mut detail.phase else {
        return vec![];
    };
    if !signed_in {
        return vec![];
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            ready.selected = match ready.selected {
                Some(i) => Some(i.saturating_sub(1)),
                None if ready.poll.options.is_empty() => None,
                None => Some(0),
            };
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ready.selected = match ready.selected {
                Some(i) if i + 1 < ready.poll.options.len() => Some(i + 1),
                Some(i) => Some(i),
                None if ready.poll.options.is_empty() => None,
                None => Some(0),
            };
            vec![]
        }
        KeyCode::Enter => {
            // Disabled until an option is picked, and while a vote is in
            // flight.
            let Some(index) = ready.selected else {
                return vec![];
            };
            if ready.voting {
                return vec![];
            }
            let Some(option) = ready.poll.options.get(index) else {
                return vec![];
            };
            ready.voting = true;
            vec![UiEffect::SubmitVote {
                poll_id,
                option_id: option.id,
            }]
        }
        _ => vec![],
    }
}

fn handle_create_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Screen::CreatePoll(form) = &mut app.screen else {
        return vec![];
    };

    if key.code == KeyCode::Esc {
        return goto_list(app);
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = next_create_focus(form.focus, form.options.len());
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = prev_create_focus(form.focus, form.options.len());
            vec![]
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.options.push(String::new());
            form.focus = CreateFocus::Option(form.options.len() - 1);
            vec![]
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Polls keep at least two options; removal is refused at two.
            if let CreateFocus::Option(index) = form.focus
                && form.options.len() > 2
            {
                form.options.remove(index);
                form.focus = CreateFocus::Option(index.min(form.options.len() - 1));
            }
            vec![]
        }
        KeyCode::Char(c) => {
            create_focused_field(form).push(c);
            vec![]
        }
        KeyCode::Backspace => {
            create_focused_field(form).pop();
            vec![]
        }
        KeyCode::Enter => submit_create(form),
        _ => vec![],
    }
}

fn submit_create(form: &mut CreatePollState) -> Vec<UiEffect> {
    form.error = None;

    if form.options.iter().any(|option| option.trim().is_empty()) {
        form.error = Some("All options must be filled".to_string());
        return vec![];
    }
    if form.submitting {
        return vec![];
    }

    form.submitting = true;
    let poll = NewPoll {
        title: form.title.clone(),
        description: form.description.clone(),
        end_date: form.end_date.clone(),
        options: form
            .options
            .iter()
            .filter(|option| !option.trim().is_empty())
            .map(|option| NewOption {
                text: option.clone(),
            })
            .collect(),
    };
    vec![UiEffect::SubmitPoll { poll }]
}

fn create_focused_field(form: &mut CreatePollState) -> &mut String {
    match form.focus {
        CreateFocus::Title => &mut form.title,
        CreateFocus::Description => &mut form.description,
        CreateFocus::EndDate => &mut form.end_date,
        CreateFocus::Option(index) => {
            // Focus is clamped on removal, so the index is always valid.
            &mut form.options[index]
        }
    }
}

fn next_create_focus(focus: CreateFocus, option_count: usize) -> CreateFocus {
    match focus {
        CreateFocus::Title => CreateFocus::Description,
        CreateFocus::Description => CreateFocus::EndDate,
        CreateFocus::EndDate => CreateFocus::Option(0),
        CreateFocus::Option(index) if index + 1 < option_count => CreateFocus::Option(index + 1),
        CreateFocus::Option(_) => CreateFocus::Title,
    }
}

fn prev_create_focus(focus: CreateFocus, option_count: usize) -> CreateFocus {
    match focus {
        CreateFocus::Title => CreateFocus::Option(option_count.saturating_sub(1)),
        CreateFocus::Description => CreateFocus::Title,
        CreateFocus::EndDate => CreateFocus::Description,
        CreateFocus::Option(0) => CreateFocus::EndDate,
        CreateFocus::Option(index) => CreateFocus::Option(index - 1),
    }
}

fn handle_auth_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let is_register = matches!(app.screen, Screen::Register(_));
    let (Screen::Login(form) | Screen::Register(form)) = &mut app.screen else {
        return vec![];
    };

    match key.code {
        KeyCode::Esc => goto_list(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = match form.focus {
                AuthFocus::Username => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Username,
            };
            vec![]
        }
        KeyCode::Char(c) => {
            match form.focus {
                AuthFocus::Username => form.username.push(c),
                AuthFocus::Password => form.password.push(c),
            }
            vec![]
        }
        KeyCode::Backspace => {
            match form.focus {
                AuthFocus::Username => {
                    form.username.pop();
                }
                AuthFocus::Password => {
                    form.password.pop();
                }
            }
            vec![]
        }
        KeyCode::Enter => {
            if form.submitting {
                return vec![];
            }
            form.submitting = true;
            form.error = None;
            let username = form.username.clone();
            let password = form.password.clone();
            if is_register {
                vec![UiEffect::Register { username, password }]
            } else {
                vec![UiEffect::Login { username, password }]
            }
        }
        _ => vec![],
    }
}

// ============================================================================
// API events
// ============================================================================

fn handle_api_event(app: &mut AppState, event: ApiUiEvent) -> Vec<UiEffect> {
    match event {
        ApiUiEvent::PollsLoaded(polls) => {
            if let Screen::PollList(list) = &mut app.screen {
                list.selected = list.selected.min(polls.len().saturating_sub(1));
                list.polls = polls;
                list.loading = false;
            }
            vec![]
        }
        ApiUiEvent::PollsLoadFailed(error) => {
            // The list screen shows no error state; it just stops loading.
            tracing::error!("Failed to fetch polls: {error}");
            if let Screen::PollList(list) = &mut app.screen {
                list.loading = false;
            }
            vec![]
        }
        ApiUiEvent::PollDetailLoaded {
            poll_id,
            poll,
            results,
        } => {
            if let Screen::PollDetail(detail) = &mut app.screen
                && detail.poll_id == poll_id
                && matches!(detail.phase, DetailPhase::Loading)
            {
                detail.phase = DetailPhase::Ready(DetailReady {
                    poll,
                    results,
                    selected: None,
                    voting: false,
                    error: None,
                });
            }
            vec![]
        }
        ApiUiEvent::PollDetailFailed { poll_id, error } => {
            tracing::error!("Failed to load poll {poll_id}: {error}");
            if let Screen::PollDetail(detail) = &mut app.screen
                && detail.poll_id == poll_id
            {
                detail.phase = DetailPhase::NotFound;
            }
            vec![]
        }
        ApiUiEvent::PollCreated(poll) => {
            tracing::info!("Created poll {}", poll.id);
            if matches!(app.screen, Screen::CreatePoll(_)) {
                return goto_list(app);
            }
            vec![]
        }
        ApiUiEvent::PollCreateFailed(error) => {
            tracing::error!("Failed to create poll: {error}");
            if let Screen::CreatePoll(form) = &mut app.screen {
                form.submitting = false;
                form.error = Some("Failed to create poll. Please try again.".to_string());
            }
            vec![]
        }
        ApiUiEvent::VoteRecorded { poll_id, results } => {
            if let Screen::PollDetail(detail) = &mut app.screen
                && detail.poll_id == poll_id
                && let DetailPhase::Ready(ready) = &mut detail.phase
            {
                ready.results = results;
                ready.selected = None;
                ready.voting = false;
                ready.error = None;
            }
            vec![]
        }
        ApiUiEvent::VoteFailed { poll_id, error } => {
            tracing::error!("Failed to vote on poll {poll_id}: {error}");
            if let Screen::PollDetail(detail) = &mut app.screen
                && detail.poll_id == poll_id
                && let DetailPhase::Ready(ready) = &mut detail.phase
            {
                ready.voting = false;
                ready.error = Some("Failed to submit vote".to_string());
            }
            vec![]
        }
        ApiUiEvent::LoginCompleted(user) => {
            if matches!(app.screen, Screen::Login(_)) {
                app.user = Some(user);
                return goto_list(app);
            }
            vec![]
        }
        ApiUiEvent::LoginFailed(error) => {
            tracing::error!("Login failed: {error}");
            if let Screen::Login(form) = &mut app.screen {
                form.submitting = false;
                form.error = Some("Failed to login. Please check your credentials.".to_string());
            }
            vec![]
        }
        ApiUiEvent::RegisterCompleted(user) => {
            if matches!(app.screen, Screen::Register(_)) {
                app.user = Some(user);
                return goto_list(app);
            }
            vec![]
        }
        ApiUiEvent::RegisterFailed(error) => {
            tracing::error!("Registration failed: {error}");
            if let Screen::Register(form) = &mut app.screen {
                form.submitting = false;
                form.error = Some("Failed to register. Please try again.".to_string());
            }
            vec![]
        }
        ApiUiEvent::LoggedOut => {
            app.user = None;
            vec![]
        }
    }
}
