/// One uploaded voice recording, as received from the multipart handler.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
