use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Launched in the foreground and waited on until it exited.
    Waited,
    /// Launched with `&`; announced once and never waited on.
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: usize,
    pub pid: i32,
    pub command: String,
    pub state: JobState,
}

/// Append-only record of every child the interpreter has launched.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: Vec<Job>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_waited(&mut self, pid: i32, command: &[String]) -> &Job {
        self.push(pid, command, JobState::Waited)
    }

    pub fn record_detached(&mut self, pid: i32, command: &[String]) -> &Job {
        self.push(pid, command, JobState::Detached)
    }

    fn push(&mut self, pid: i32, command: &[String], state: JobState) -> &Job {
        let job = Job {
            id: self.jobs.len() + 1,
            pid,
            command: command.join(" "),
            state,
        };
        debug!("job {} ({:?}): pid {} `{}`", job.id, job.state, job.pid, job.command);
        self.jobs.push(job);
        &self.jobs[self.jobs.len() - 1]
    }

    pub fn latest_detached(&self) -> Option<&Job> {
        self.jobs
            .iter()
            .rev()
            .find(|job| job.state == JobState::Detached)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
