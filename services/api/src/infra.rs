//! In-memory repository implementations backing the service wiring. Each
//! mirrors the relational table it stands in for; swapping in a database
//! only means re-implementing these traits.

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use mindhaven::assessments::{
    standard_catalog, AssessmentAnswer, AssessmentId, AssessmentQuestion, AssessmentRepository,
    AssessmentResult, AssessmentType, AssessmentTypeId,
};
use mindhaven::assignments::{Assignment, AssignmentId, AssignmentRepository, AssignmentResponse};
use mindhaven::chat::{ChatMessage, ChatRepository, Conversation, ConversationId};
use mindhaven::goals::{Goal, GoalId, GoalRepository};
use mindhaven::journal::{JournalEntry, JournalRepository};
use mindhaven::mood::{MoodEntry, MoodRepository};
use mindhaven::storage::StorageError;
use mindhaven::users::domain::{UserAccount, UserId};
use mindhaven::users::UserRepository;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    accounts: Arc<Mutex<HashMap<UserId, UserAccount>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, StorageError> {
        let mut guard = self.accounts.lock().expect("user mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(StorageError::Conflict);
        }
        guard.insert(account.user_id.clone(), account.clone());
        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StorageError> {
        let guard = self.accounts.lock().expect("user mutex poisoned");
        Ok(guard
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StorageError> {
        let guard = self.accounts.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJournalRepository {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl JournalRepository for InMemoryJournalRepository {
    fn insert(&self, entry: JournalEntry) -> Result<JournalEntry, StorageError> {
        let mut guard = self.entries.lock().expect("journal mutex poisoned");
        guard.push(entry.clone());
        Ok(entry)
    }

    fn entries_for(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, StorageError> {
        let guard = self.entries.lock().expect("journal mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|entry| &entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMoodRepository {
    entries: Arc<Mutex<Vec<MoodEntry>>>,
}

impl MoodRepository for InMemoryMoodRepository {
    fn insert(&self, entry: MoodEntry) -> Result<MoodEntry, StorageError> {
        let mut guard = self.entries.lock().expect("mood mutex poisoned");
        guard.push(entry.clone());
        Ok(entry)
    }

    fn entries_for(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, StorageError> {
        let guard = self.entries.lock().expect("mood mutex poisoned");
        let mut entries: Vec<MoodEntry> = guard
            .iter()
            .filter(|entry| &entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    fn entries_between(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEntry>, StorageError> {
        let guard = self.entries.lock().expect("mood mutex poisoned");
        let mut entries: Vec<MoodEntry> = guard
            .iter()
            .filter(|entry| {
                &entry.user_id == user_id
                    && entry.recorded_at >= start
                    && entry.recorded_at <= end
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        Ok(entries)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryGoalRepository {
    goals: Arc<Mutex<Vec<Goal>>>,
}

impl GoalRepository for InMemoryGoalRepository {
    fn insert(&self, goal: Goal) -> Result<Goal, StorageError> {
        let mut guard = self.goals.lock().expect("goal mutex poisoned");
        guard.push(goal.clone());
        Ok(goal)
    }

    fn update(&self, goal: Goal) -> Result<(), StorageError> {
        let mut guard = self.goals.lock().expect("goal mutex poisoned");
        match guard.iter_mut().find(|row| row.goal_id == goal.goal_id) {
            Some(row) => {
                *row = goal;
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn delete(&self, goal_id: &GoalId) -> Result<(), StorageError> {
        let mut guard = self.goals.lock().expect("goal mutex poisoned");
        let before = guard.len();
        guard.retain(|row| &row.goal_id != goal_id);
        if guard.len() == before {
            Err(StorageError::NotFound)
        } else {
            Ok(())
        }
    }

    fn fetch(&self, goal_id: &GoalId) -> Result<Option<Goal>, StorageError> {
        let guard = self.goals.lock().expect("goal mutex poisoned");
        Ok(guard.iter().find(|row| &row.goal_id == goal_id).cloned())
    }

    fn goals_for(&self, user_id: &UserId) -> Result<Vec<Goal>, StorageError> {
        let guard = self.goals.lock().expect("goal mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssignmentRepository {
    assignments: Arc<Mutex<Vec<Assignment>>>,
    responses: Arc<Mutex<Vec<AssignmentResponse>>>,
}

impl AssignmentRepository for InMemoryAssignmentRepository {
    fn insert(&self, assignment: Assignment) -> Result<Assignment, StorageError> {
        let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
        guard.push(assignment.clone());
        Ok(assignment)
    }

    fn update(&self, assignment: Assignment) -> Result<(), StorageError> {
        let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
        match guard
            .iter_mut()
            .find(|row| row.assignment_id == assignment.assignment_id)
        {
            Some(row) => {
                *row = assignment;
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn delete(&self, assignment_id: &AssignmentId) -> Result<(), StorageError> {
        let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
        let before = guard.len();
        guard.retain(|row| &row.assignment_id != assignment_id);
        if guard.len() == before {
            Err(StorageError::NotFound)
        } else {
            Ok(())
        }
    }

    fn fetch(&self, assignment_id: &AssignmentId) -> Result<Option<Assignment>, StorageError> {
        let guard = self.assignments.lock().expect("assignment mutex poisoned");
        Ok(guard
            .iter()
            .find(|row| &row.assignment_id == assignment_id)
            .cloned())
    }

    fn assignments_for(&self, user_id: &UserId) -> Result<Vec<Assignment>, StorageError> {
        let guard = self.assignments.lock().expect("assignment mutex poisoned");
        let mut rows: Vec<Assignment> = guard
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(rows)
    }

    fn insert_responses(&self, responses: Vec<AssignmentResponse>) -> Result<(), StorageError> {
        let mut guard = self.responses.lock().expect("response mutex poisoned");
        guard.extend(responses);
        Ok(())
    }

    fn responses_for(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<AssignmentResponse>, StorageError> {
        let guard = self.responses.lock().expect("response mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| &row.assignment_id == assignment_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    catalog: Arc<Mutex<Vec<(AssessmentType, Vec<AssessmentQuestion>)>>>,
    results: Arc<Mutex<Vec<AssessmentResult>>>,
    answers: Arc<Mutex<HashMap<AssessmentId, Vec<AssessmentAnswer>>>>,
}

impl InMemoryAssessmentRepository {
    /// Repository preloaded with the bundled screening catalog.
    pub(crate) fn seeded() -> Self {
        Self {
            catalog: Arc::new(Mutex::new(standard_catalog())),
            ..Self::default()
        }
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn types(&self) -> Result<Vec<AssessmentType>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().map(|(assessment, _)| assessment.clone()).collect())
    }

    fn type_by_id(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Option<AssessmentType>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .find(|(assessment, _)| &assessment.type_id == type_id)
            .map(|(assessment, _)| assessment.clone()))
    }

    fn questions_for(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Vec<AssessmentQuestion>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .find(|(assessment, _)| &assessment.type_id == type_id)
            .map(|(_, questions)| questions.clone())
            .unwrap_or_default())
    }

    fn insert_result(&self, result: AssessmentResult) -> Result<AssessmentResult, StorageError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        guard.push(result.clone());
        Ok(result)
    }

    fn insert_answers(&self, answers: Vec<AssessmentAnswer>) -> Result<(), StorageError> {
        let mut guard = self.answers.lock().expect("answers mutex poisoned");
        for answer in answers {
            guard
                .entry(answer.assessment_id.clone())
                .or_default()
                .push(answer);
        }
        Ok(())
    }

    fn results_for(&self, user_id: &UserId) -> Result<Vec<AssessmentResult>, StorageError> {
        let guard = self.results.lock().expect("results mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|result| &result.user_id == user_id)
            .cloned()
            .collect())
    }

    fn answers_for(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentAnswer>, StorageError> {
        let guard = self.answers.lock().expect("answers mutex poisoned");
        Ok(guard.get(assessment_id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryChatRepository {
    conversations: Arc<Mutex<Vec<Conversation>>>,
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl ChatRepository for InMemoryChatRepository {
    fn insert_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StorageError> {
        let mut guard = self.conversations.lock().expect("chat mutex poisoned");
        guard.push(conversation.clone());
        Ok(conversation)
    }

    fn conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Conversation>, StorageError> {
        let guard = self.conversations.lock().expect("chat mutex poisoned");
        Ok(guard
            .iter()
            .find(|conv| &conv.conversation_id == conversation_id)
            .cloned())
    }

    fn conversations_for(&self, user_id: &UserId) -> Result<Vec<Conversation>, StorageError> {
        let guard = self.conversations.lock().expect("chat mutex poisoned");
        let mut conversations: Vec<Conversation> = guard
            .iter()
            .filter(|conv| &conv.user_id == user_id)
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        Ok(conversations)
    }

    fn touch_conversation(
        &self,
        conversation_id: &ConversationId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self.conversations.lock().expect("chat mutex poisoned");
        match guard
            .iter_mut()
            .find(|conv| &conv.conversation_id == conversation_id)
        {
            Some(conv) => {
                conv.last_message_at = at;
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn insert_message(&self, message: ChatMessage) -> Result<ChatMessage, StorageError> {
        let mut guard = self.messages.lock().expect("chat mutex poisoned");
        guard.push(message.clone());
        Ok(message)
    }

    fn messages_for(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let guard = self.messages.lock().expect("chat mutex poisoned");
        Ok(guard
            .iter()
            .filter(|message| &message.conversation_id == conversation_id)
            .cloned()
            .collect())
    }
}
