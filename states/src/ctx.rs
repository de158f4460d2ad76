use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::runtime::UpdateKind;
use crate::{
    Command, CommandSnapshot, Compute, Dep, Error, State, StateRuntime, StateSyncStatus,
    TaskHandle, TaskId, Updater,
};

pub(crate) struct ComputeSlot {
    pub(crate) value: Box<dyn Compute>,
    state_deps: Vec<TypeId>,
    compute_deps: Vec<TypeId>,
    status: StateSyncStatus,
}

struct QueuedCommand {
    type_id: TypeId,
    name: &'static str,
    command: Box<dyn Command>,
}

/// Owner of every state, compute and in-flight command of the app.
///
/// The frame loop is expected to call, in order:
/// 1. `sync_computes` to apply updates published by finished commands,
/// 2. the UI code, which reads with `state` / `cached` and edits with `update`,
/// 3. `run_computed` to refresh computes whose inputs changed,
/// 4. `flush_commands` to start the commands enqueued during the frame.
#[derive(Default)]
pub struct StateCtx {
    runtime: StateRuntime,
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    // registration order, which is also the run order
    compute_order: Vec<TypeId>,
    command_queue: Vec<QueuedCommand>,
    running: BTreeMap<TypeId, TaskHandle>,
    generation: u64,
    tasks: JoinSet<()>,
}

impl Debug for StateCtx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.compute_order.len())
            .field("queued_commands", &self.command_queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        if self.states.insert(id, Box::new(state)).is_some() {
            warn!(
                "StateCtx: state {} registered twice, keeping the latest",
                type_name::<T>()
            );
        }
        self.mark_state_dependents(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_deps, compute_deps) = compute.deps();
        let slot = ComputeSlot {
            value: Box::new(compute),
            state_deps,
            compute_deps,
            status: StateSyncStatus::Init,
        };
        if self.computes.insert(id, slot).is_none() {
            self.compute_order.push(id);
        }
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if the state type is not registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|err| panic!("StateCtx: {err}"))
    }

    /// Mutable access to a state. Computes depending on it are marked dirty even if the
    /// caller ends up not changing anything.
    ///
    /// # Panics
    /// Panics if the state type is not registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_state_dependents(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("StateCtx: {}", Error::state_not_found::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if the compute type is not registered.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("StateCtx: {}", Error::compute_not_found::<T>()))
    }

    pub fn compute_status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|slot| slot.status)
    }

    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    /// Applies every update published through an [`Updater`] since the last sync.
    pub fn sync_computes(&mut self) {
        for (id, update) in self.runtime.drain() {
            let Some(slot) = self.computes.get_mut(&id) else {
                warn!("StateCtx: dropping update for unregistered compute {id:?}");
                continue;
            };
            let value = match update {
                UpdateKind::Set(value) => value,
                UpdateKind::Modify(apply) => {
                    let Some(value) = apply(slot.value.as_any()) else {
                        warn!("StateCtx: modify does not match compute {id:?}");
                        continue;
                    };
                    value
                }
            };
            slot.value.assign_box(value);
            self.mark_compute_dependents(id);
        }
    }

    /// Runs the computes whose dependencies changed, applying each result before the next
    /// compute runs so that chained computes settle within one call.
    pub fn run_computed(&mut self) {
        let updater = self.updater();

        // A further pass is only needed when a compute dirtied one registered before it.
        for _ in 0..=self.compute_order.len() {
            let mut ran = false;

            for index in 0..self.compute_order.len() {
                let id = self.compute_order[index];
                let Some(slot) = self.computes.get(&id) else {
                    continue;
                };
                if !slot.status.needs_run() {
                    continue;
                }

                slot.value
                    .compute(Dep::new(&self.states, &self.computes), updater.clone());
                if let Some(slot) = self.computes.get_mut(&id) {
                    slot.status = StateSyncStatus::Clean;
                }
                ran = true;

                self.sync_computes();
            }

            if !ran {
                return;
            }
        }

        warn!("StateCtx: computes still dirty after a full set of passes, check for dependency cycles");
    }

    /// Starts a command right away on the current tokio runtime.
    pub fn dispatch<C: Command + Default>(&mut self) {
        let command = C::default();
        self.spawn_command(TypeId::of::<C>(), type_name::<C>(), &command);
    }

    /// Queues a command until the next `flush_commands`, usually the end of the frame.
    pub fn enqueue_command<C: Command + Default>(&mut self) {
        self.command_queue.push(QueuedCommand {
            type_id: TypeId::of::<C>(),
            name: type_name::<C>(),
            command: Box::new(C::default()),
        });
    }

    pub fn queued_commands(&self) -> usize {
        self.command_queue.len()
    }

    pub fn flush_commands(&mut self) {
        self.reap_finished();

        for queued in std::mem::take(&mut self.command_queue) {
            self.spawn_command(queued.type_id, queued.name, queued.command.as_ref());
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels every running command and waits for the tasks to stop.
    pub async fn shutdown(&mut self) {
        for handle in self.running.values() {
            handle.cancel();
        }
        self.running.clear();
        self.command_queue.clear();
        self.tasks.shutdown().await;
    }

    fn spawn_command(&mut self, type_id: TypeId, name: &'static str, command: &dyn Command) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("StateCtx: no tokio runtime available, dropping {name}");
            return;
        };

        if command.supersedes_previous()
            && let Some(previous) = self.running.get(&type_id)
            && !previous.is_cancelled()
        {
            debug!(
                "StateCtx: {name} generation {} superseded",
                previous.id().generation()
            );
            previous.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.running.insert(
            type_id,
            TaskHandle::new(TaskId::new(type_id, self.generation), token.clone()),
        );

        debug!("StateCtx: dispatching {name}");
        let future = command.run(self.snapshot(), self.updater(), token.clone());
        self.tasks.spawn_on(
            async move {
                tokio::select! {
                    () = token.cancelled() => debug!("StateCtx: {name} cancelled"),
                    () = future => {}
                }
            },
            &runtime,
        );
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("StateCtx: command task panicked: {err}");
            }
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn mark_state_dependents(&mut self, id: TypeId) {
        for slot in self.computes.values_mut() {
            if slot.state_deps.contains(&id) && slot.status == StateSyncStatus::Clean {
                slot.status = StateSyncStatus::Dirty;
            }
        }
    }

    fn mark_compute_dependents(&mut self, id: TypeId) {
        for slot in self.computes.values_mut() {
            if slot.compute_deps.contains(&id) && slot.status == StateSyncStatus::Clean {
                slot.status = StateSyncStatus::Dirty;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::time::Duration;

    use super::*;
    use crate::{CommandFuture, assign_impl, no_deps, snapshot_clone, state_deps};

    #[derive(Debug, Default, Clone)]
    struct Query {
        text: String,
    }

    impl State for Query {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            snapshot_clone(self)
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Upper {
        text: String,
        runs: usize,
    }

    impl Compute for Upper {
        fn deps(&self) -> crate::ComputeDeps {
            state_deps(&[TypeId::of::<Query>()])
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            updater.set(Self {
                text: deps.state::<Query>().text.to_uppercase(),
                runs: self.runs + 1,
            });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Echo {
        text: Option<String>,
    }

    impl Compute for Echo {
        fn deps(&self) -> crate::ComputeDeps {
            no_deps()
        }

        fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Default)]
    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let text = snap.state::<Query>().text.clone();
            Box::pin(async move {
                updater.set(Echo { text: Some(text) });
            })
        }
    }

    #[derive(Default)]
    struct SlowEchoCommand;

    impl Command for SlowEchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let text = snap.state::<Query>().text.clone();
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                updater.set(Echo { text: Some(text) });
            })
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Seen {
        texts: Vec<String>,
    }

    impl Compute for Seen {
        fn deps(&self) -> crate::ComputeDeps {
            no_deps()
        }

        fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    /// Runs side by side with earlier runs and appends to `Seen`.
    #[derive(Default)]
    struct SlowRecordCommand;

    impl Command for SlowRecordCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let text = snap.state::<Query>().text.clone();
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                updater.modify::<Seen>(move |seen| seen.texts.push(text));
            })
        }

        fn supersedes_previous(&self) -> bool {
            false
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Query::default());
        ctx.record_compute(Upper::default());
        ctx.record_compute(Echo::default());
        ctx.record_compute(Seen::default());
        ctx
    }

    async fn drain_tasks(ctx: &mut StateCtx) {
        while ctx.task_set_mut().join_next().await.is_some() {}
        ctx.sync_computes();
    }

    #[test]
    fn compute_runs_on_first_pass_and_after_dependency_edits() {
        let mut ctx = ctx();
        ctx.run_computed();
        assert_eq!(ctx.compute::<Upper>().runs, 1);

        ctx.run_computed();
        assert_eq!(ctx.compute::<Upper>().runs, 1, "clean compute must not rerun");

        ctx.update::<Query>(|q| q.text = "john".to_owned());
        assert_eq!(ctx.compute_status::<Upper>(), Some(StateSyncStatus::Dirty));
        ctx.run_computed();

        let upper = ctx.compute::<Upper>();
        assert_eq!(upper.text, "JOHN");
        assert_eq!(upper.runs, 2);
    }

    #[test]
    fn updates_apply_on_sync_only() {
        let mut ctx = ctx();
        ctx.updater().set(Echo {
            text: Some("queued".to_owned()),
        });
        assert!(ctx.compute::<Echo>().text.is_none());

        ctx.sync_computes();
        assert_eq!(ctx.compute::<Echo>().text.as_deref(), Some("queued"));
    }

    #[test]
    fn missing_state_is_reported() {
        let ctx = StateCtx::new();
        assert_eq!(
            ctx.try_state::<Query>().unwrap_err(),
            Error::state_not_found::<Query>()
        );
        assert!(ctx.cached::<Echo>().is_none());
    }

    #[test]
    fn dispatch_without_runtime_is_dropped() {
        let mut ctx = ctx();
        ctx.dispatch::<EchoCommand>();
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn dispatched_command_sees_snapshot_and_publishes() {
        let mut ctx = ctx();
        ctx.update::<Query>(|q| q.text = "jane".to_owned());
        ctx.dispatch::<EchoCommand>();
        ctx.update::<Query>(|q| q.text = "changed after dispatch".to_owned());

        drain_tasks(&mut ctx).await;

        assert_eq!(ctx.compute::<Echo>().text.as_deref(), Some("jane"));
    }

    #[tokio::test]
    async fn enqueued_commands_wait_for_flush() {
        let mut ctx = ctx();
        ctx.enqueue_command::<EchoCommand>();
        assert_eq!(ctx.queued_commands(), 1);
        assert_eq!(ctx.task_count(), 0);

        ctx.flush_commands();
        assert_eq!(ctx.queued_commands(), 0);
        drain_tasks(&mut ctx).await;

        assert_eq!(ctx.compute::<Echo>().text.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn redispatch_cancels_previous_run() {
        let mut ctx = ctx();
        ctx.update::<Query>(|q| q.text = "first".to_owned());
        ctx.dispatch::<SlowEchoCommand>();
        ctx.update::<Query>(|q| q.text = "second".to_owned());
        ctx.dispatch::<SlowEchoCommand>();

        drain_tasks(&mut ctx).await;

        assert_eq!(ctx.compute::<Echo>().text.as_deref(), Some("second"));
    }

    #[test]
    fn modify_applies_to_the_latest_value() {
        let mut ctx = ctx();
        let updater = ctx.updater();
        updater.set(Seen {
            texts: vec!["set".to_owned()],
        });
        updater.modify::<Seen>(|seen| seen.texts.push("first".to_owned()));
        updater.modify::<Seen>(|seen| seen.texts.push("second".to_owned()));
        assert!(ctx.compute::<Seen>().texts.is_empty());

        ctx.sync_computes();

        assert_eq!(ctx.compute::<Seen>().texts, vec!["set", "first", "second"]);
    }

    #[tokio::test]
    async fn non_superseding_runs_all_complete() {
        let mut ctx = ctx();
        ctx.update::<Query>(|q| q.text = "first".to_owned());
        ctx.dispatch::<SlowRecordCommand>();
        ctx.update::<Query>(|q| q.text = "second".to_owned());
        ctx.dispatch::<SlowRecordCommand>();

        drain_tasks(&mut ctx).await;

        let mut texts = ctx.compute::<Seen>().texts.clone();
        texts.sort();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
