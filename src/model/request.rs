use rocket::serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct UploadRequest {
    pub usernames: Vec<String>,
}
