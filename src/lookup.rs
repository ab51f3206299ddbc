//! Remote problem lookup.
//!
//! Given a numeric id, a [`ProblemSource`] may supply the title, difficulty
//! and topic tags of a problem. The source is optional: every failure is
//! reported as a value, and [`lookup_or_warn`] turns it into `None` so the
//! caller can fall back to manual input.
//!
//! [`LeetCodeClient`] talks to the LeetCode GraphQL API in two steps, since
//! the detail query is keyed by slug rather than by frontend id:
//!
//! 1. `problemsetQuestionList` → find the `titleSlug` whose
//!    `questionFrontendId` matches the id
//! 2. `question(titleSlug)` → title, difficulty and `topicTags`

use crate::config::LookupConfig;
use crate::types::Difficulty;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Malformed(String),
}

/// What a source knows about one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInfo {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
}

pub trait ProblemSource {
    /// `Ok(None)` when the source has no problem with this id.
    fn lookup(&self, id: u32) -> Result<Option<ProblemInfo>, LookupError>;
}

/// Query a source, logging and swallowing failures.
pub fn lookup_or_warn(source: &dyn ProblemSource, id: u32) -> Option<ProblemInfo> {
    match source.lookup(id) {
        Ok(Some(info)) => {
            log::debug!("lookup found #{id}: {}", info.title);
            Some(info)
        }
        Ok(None) => {
            log::warn!("problem #{id} not found by the remote source");
            None
        }
        Err(e) => {
            log::warn!("problem lookup for #{id} failed: {e}");
            None
        }
    }
}

const QUESTION_LIST_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
    problemsetQuestionList: questionList(
        categorySlug: $categorySlug
        limit: $limit
        skip: $skip
        filters: $filters
    ) {
        questions: data {
            questionFrontendId
            titleSlug
        }
    }
}
"#;

const QUESTION_DETAIL_QUERY: &str = r#"
query questionData($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        questionFrontendId
        title
        titleSlug
        difficulty
        topicTags {
            name
        }
    }
}
"#;

/// Upper bound on the question list page; covers the whole problem set.
const QUESTION_LIST_LIMIT: u32 = 5000;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionListData {
    problemset_question_list: Option<QuestionList>,
}

#[derive(Debug, Deserialize)]
struct QuestionList {
    #[serde(default)]
    questions: Vec<QuestionSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionSummary {
    question_frontend_id: String,
    title_slug: String,
}

#[derive(Debug, Deserialize)]
struct QuestionDetailData {
    question: Option<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDetail {
    question_frontend_id: String,
    title: String,
    difficulty: String,
    #[serde(default)]
    topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Deserialize)]
struct TopicTag {
    name: String,
}

fn find_title_slug(list: QuestionListData, id: u32) -> Option<String> {
    let wanted = id.to_string();
    list.problemset_question_list?
        .questions
        .into_iter()
        .find(|q| q.question_frontend_id == wanted)
        .map(|q| q.title_slug)
}

fn into_info(detail: QuestionDetail) -> Result<ProblemInfo, LookupError> {
    let id = detail.question_frontend_id.parse().map_err(|_| {
        LookupError::Malformed(format!(
            "questionFrontendId {:?} is not numeric",
            detail.question_frontend_id
        ))
    })?;
    let difficulty = Difficulty::parse(&detail.difficulty).ok_or_else(|| {
        LookupError::Malformed(format!("unknown difficulty {:?}", detail.difficulty))
    })?;
    Ok(ProblemInfo {
        id,
        title: detail.title,
        difficulty,
        topics: detail.topic_tags.into_iter().map(|t| t.name).collect(),
    })
}

/// LeetCode GraphQL client.
pub struct LeetCodeClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl LeetCodeClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("problem-archive/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<Option<T>, LookupError> {
        let response: GraphQlResponse<T> = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.data)
    }
}

impl ProblemSource for LeetCodeClient {
    fn lookup(&self, id: u32) -> Result<Option<ProblemInfo>, LookupError> {
        let list: Option<QuestionListData> = self.query(
            QUESTION_LIST_QUERY,
            json!({
                "categorySlug": "",
                "skip": 0,
                "limit": QUESTION_LIST_LIMIT,
                "filters": {}
            }),
        )?;
        let Some(title_slug) = list.and_then(|l| find_title_slug(l, id)) else {
            return Ok(None);
        };

        let detail: Option<QuestionDetailData> =
            self.query(QUESTION_DETAIL_QUERY, json!({ "titleSlug": title_slug }))?;
        match detail.and_then(|d| d.question) {
            Some(question) => into_info(question).map(Some),
            None => Ok(None),
        }
    }
}
