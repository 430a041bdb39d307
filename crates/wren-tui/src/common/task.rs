use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionResolve,
    FeedLoad,
    PostCreate,
    PostDelete,
    Login,
    Register,
    AccountDelete,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
///
/// Each kind tracks at most one active task. A completion whose id does
/// not match the active id is stale and gets dropped, so a late response
/// can never overwrite the result of a later-issued request.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_resolve: TaskState,
    pub feed_load: TaskState,
    pub post_create: TaskState,
    pub post_delete: TaskState,
    pub login: TaskState,
    pub register: TaskState,
    pub account_delete: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionResolve => &mut self.session_resolve,
            TaskKind::FeedLoad => &mut self.feed_load,
            TaskKind::PostCreate => &mut self.post_create,
            TaskKind::PostDelete => &mut self.post_delete,
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::AccountDelete => &mut self.account_delete,
        }
    }

    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionResolve => &self.session_resolve,
            TaskKind::FeedLoad => &self.feed_load,
            TaskKind::PostCreate => &self.post_create,
            TaskKind::PostDelete => &self.post_delete,
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::AccountDelete => &self.account_delete,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_resolve.is_running()
            || self.feed_load.is_running()
            || self.post_create.is_running()
            || self.post_delete.is_running()
            || self.login.is_running()
            || self.register.is_running()
            || self.account_delete.is_running()
    }
}
