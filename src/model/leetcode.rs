use rocket::serde::Deserialize;
use serde_json::Value;

/// Response envelope of the LeetCode GraphQL endpoint. `matchedUser` is null
/// when the username does not exist or the profile is private.
#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct GraphqlResponse {
    pub data: Option<GraphqlData>,
    pub errors: Option<Vec<Value>>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct GraphqlData {
    #[serde(rename = "matchedUser")]
    pub matched_user: Option<MatchedUser>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct MatchedUser {
    pub username: String,
    pub profile: Option<Profile>,
    #[serde(rename = "submitStats")]
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Profile {
    pub ranking: Option<i64>,
    pub reputation: Option<i64>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    pub ac_submission_num: Vec<SubmissionCount>,
}

/// Accepted-submission counter for one difficulty bucket ("All", "Easy",
/// "Medium", "Hard").
#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SubmissionCount {
    pub difficulty: String,
    #[serde(default)]
    pub count: i64,
}
