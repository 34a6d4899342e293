use super::model::View;
use super::section::{RelayCall, Section, SectionParams};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Rendered(View),
    Errored(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<String>,
    pub section: Section,
    pub params: SectionParams,
    pub load: LoadState,
    // Bumped per load; results for an older generation are dropped.
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetUser(String),
    Select {
        section: Section,
        params: SectionParams,
    },
    Resolved {
        generation: u64,
        outcome: Result<View, String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    PromptUsername,
    Rejected(&'static str),
    Load(PendingLoad),
}

/// Report back through [`Action::Resolved`] with the same generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLoad {
    pub generation: u64,
    pub section: Section,
    pub calls: Vec<RelayCall>,
}

impl Session {
    pub fn with_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::default()
        }
    }

    /// A session positioned on `section`, as the shell last showed it.
    pub fn at(user: Option<String>, section: Section, params: SectionParams) -> Self {
        Self {
            user,
            section,
            params,
            ..Self::default()
        }
    }

    pub fn apply(self, action: Action) -> (Session, Effect) {
        match action {
            Action::SetUser(name) => self.set_user(name),
            Action::Select { section, params } => self.select(section, params),
            Action::Resolved {
                generation,
                outcome,
            } => (self.resolve(generation, outcome), Effect::None),
        }
    }

    fn set_user(self, name: String) -> (Session, Effect) {
        let name = name.trim().to_string();
        if name.is_empty() {
            return (self, Effect::Rejected("Please enter a username"));
        }
        if self.user.as_deref() == Some(name.as_str()) {
            return (self, Effect::None);
        }

        let (section, params) = match self.user {
            Some(_) => (self.section, self.params.clone()),
            None => (Section::Dashboard, SectionParams::default()),
        };
        Session {
            user: Some(name),
            ..self
        }
        .select(section, params)
    }

    fn select(mut self, section: Section, params: SectionParams) -> (Session, Effect) {
        let Some(user) = self.user.clone() else {
            return (self, Effect::PromptUsername);
        };

        self.generation += 1;
        self.section = section;
        self.load = LoadState::Loading;
        let calls = section.plan(&user, &params);
        self.params = params;

        let effect = Effect::Load(PendingLoad {
            generation: self.generation,
            section,
            calls,
        });
        (self, effect)
    }

    fn resolve(mut self, generation: u64, outcome: Result<View, String>) -> Session {
        if generation != self.generation || self.load != LoadState::Loading {
            return self;
        }
        self.load = match outcome {
            Ok(view) => LoadState::Rendered(view),
            Err(message) => LoadState::Errored(message),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::section::SearchKind;

    fn load(effect: Effect) -> PendingLoad {
        match effect {
            Effect::Load(pending) => pending,
            other => panic!("expected a load, got {other:?}"),
        }
    }

    fn select(section: Section) -> Action {
        Action::Select {
            section,
            params: SectionParams::default(),
        }
    }

    #[test]
    fn selecting_without_user_prompts() {
        let (session, effect) = Session::default().apply(select(Section::TopTracks));
        assert_eq!(effect, Effect::PromptUsername);
        assert_eq!(session.load, LoadState::Idle);
    }

    #[test]
    fn first_user_loads_dashboard() {
        let (session, effect) = Session::default().apply(Action::SetUser(" rj ".to_string()));
        let pending = load(effect);
        assert_eq!(pending.section, Section::Dashboard);
        assert_eq!(pending.calls.len(), 4);
        assert_eq!(session.user.as_deref(), Some("rj"));
        assert_eq!(session.load, LoadState::Loading);
    }

    #[test]
    fn empty_user_is_rejected() {
        let (session, effect) = Session::default().apply(Action::SetUser("   ".to_string()));
        assert_eq!(effect, Effect::Rejected("Please enter a username"));
        assert!(session.user.is_none());
    }

    #[test]
    fn switching_user_reloads_current_section() {
        let (session, _) = Session::with_user("rj").apply(select(Section::LovedTracks));
        let (session, effect) = session.apply(Action::SetUser("bob".to_string()));
        let pending = load(effect);
        assert_eq!(pending.section, Section::LovedTracks);
        assert_eq!(pending.calls[0].param("user"), Some("bob"));
        assert_eq!(session.user.as_deref(), Some("bob"));

        let (_, effect) = session.apply(Action::SetUser("bob".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn resolution_renders_or_errors() {
        let (session, effect) = Session::with_user("rj").apply(select(Section::ArtistSearch));
        let generation = load(effect).generation;
        let view = View::SearchForm {
            kind: SearchKind::Artist,
        };
        let (rendered, _) = session.clone().apply(Action::Resolved {
            generation,
            outcome: Ok(view.clone()),
        });
        assert_eq!(rendered.load, LoadState::Rendered(view));

        let (errored, _) = session.apply(Action::Resolved {
            generation,
            outcome: Err("Invalid API key".to_string()),
        });
        assert_eq!(errored.load, LoadState::Errored("Invalid API key".to_string()));
    }

    #[test]
    fn stale_results_are_ignored() {
        let (session, effect) = Session::with_user("rj").apply(select(Section::TopArtists));
        let stale = load(effect).generation;
        let (session, effect) = session.apply(select(Section::TopAlbums));
        let current = load(effect).generation;
        assert!(current > stale);

        let (session, _) = session.apply(Action::Resolved {
            generation: stale,
            outcome: Err("late".to_string()),
        });
        assert_eq!(session.load, LoadState::Loading);
        assert_eq!(session.section, Section::TopAlbums);
    }
}
