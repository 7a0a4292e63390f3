use super::lock::WorkspaceLock;
use super::repository::Repository;
use super::transaction::Transaction;
use crate::assignment::{AssignmentStore, GoalAssignment, Snapshot};
use crate::config::CrewConfig;
use crate::error::{CrewError, Result};
use crate::model::{Goal, Member, Project, Task};
use crate::validation;
use std::path::{Path, PathBuf};

/// All record repositories of one workspace directory.
pub struct Workspace {
    data_path: PathBuf,
    pub members: Repository<Member>,
    pub tasks: Repository<Task>,
    pub projects: Repository<Project>,
    pub goals: Repository<Goal>,
}

impl Workspace {
    pub fn new(config: &CrewConfig, project_root: &Path) -> Self {
        Self::at(
            &config.data_path(project_root),
            config.crewload.id_length,
        )
    }

    pub fn at(data_path: &Path, id_length: usize) -> Self {
        Self {
            data_path: data_path.to_path_buf(),
            members: Repository::new(data_path, id_length),
            tasks: Repository::new(data_path, id_length),
            projects: Repository::new(data_path, id_length),
            goals: Repository::new(data_path, id_length),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Create the record directories.
    pub fn init(&self) -> Result<()> {
        for dir in [
            self.members.dir(),
            self.tasks.dir(),
            self.projects.dir(),
            self.goals.dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn create_member(&self, member: &Member) -> Result<PathBuf> {
        self.members.create(member)
    }

    pub fn create_task(&self, task: &Task) -> Result<PathBuf> {
        self.check_members(&task.assignees)?;
        self.tasks.create(task)
    }

    pub fn create_project(&self, project: &Project) -> Result<PathBuf> {
        self.check_members(project.participants.iter().chain(&project.owners))?;
        self.projects.create(project)
    }

    pub fn create_goal(&self, goal: &Goal) -> Result<PathBuf> {
        self.check_members(&goal.assignee)?;
        self.goals.create(goal)
    }

    fn check_members<'a, I>(&self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a String>,
    {
        validation::validate_members_exist(ids, |id| self.members.exists(id))
    }
}

impl AssignmentStore for Workspace {
    type Guard = WorkspaceLock;

    fn exclusive(&self, operation: &str) -> Result<Self::Guard> {
        WorkspaceLock::acquire(&self.data_path, operation)
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            members: self.members.list_strict()?,
            tasks: self.tasks.list_strict()?,
            projects: self.projects.list_strict()?,
            goals: self.goals.list_strict()?,
        })
    }

    fn add_task_assignee(&self, task_id: &str, member_id: &str) -> Result<()> {
        let mut task = self.tasks.get(task_id)?;
        if !task.add_assignee(member_id) {
            return Ok(());
        }
        let (path, content) = self.tasks.render_in_place(&task)?;
        let mut transaction = Transaction::new();
        transaction.stage(path, content);
        transaction.commit()?;
        Ok(())
    }

    fn commit_goal_assignments(&self, assignments: &[GoalAssignment]) -> Result<()> {
        let mut transaction = Transaction::new();
        for assignment in assignments {
            if !self.members.exists(&assignment.member_id) {
                return Err(CrewError::Validation(format!(
                    "Member '{}' does not exist",
                    assignment.member_id
                )));
            }
            let mut goal = self.goals.get(&assignment.goal_id)?;
            goal.assignee = Some(assignment.member_id.clone());
            let (path, content) = self.goals.render_in_place(&goal)?;
            transaction.stage(path, content);
        }

        let written = transaction.commit()?;
        tracing::info!(written, "Committed goal assignments");
        Ok(())
    }
}
