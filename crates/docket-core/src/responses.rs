use crate::parameters::ModelRef;
use docket_config::{GlobalResponseMessage, GlobalResponseMessageBody};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Post,
    Get,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl RequestMethod {
    pub const ALL: [RequestMethod; 8] = [
        Self::Post,
        Self::Get,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
        Self::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMessage {
    pub code: u16,
    pub message: String,
    pub model: Option<ModelRef>,
}

impl From<&GlobalResponseMessageBody> for ResponseMessage {
    fn from(body: &GlobalResponseMessageBody) -> Self {
        Self {
            code: body.code,
            message: body.message.clone(),
            model: body.model_ref.as_deref().and_then(ModelRef::new),
        }
    }
}

/// Global response messages for each HTTP method, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseMessageTable {
    messages: [Vec<ResponseMessage>; 8],
}

impl ResponseMessageTable {
    pub fn get(&self, method: RequestMethod) -> &[ResponseMessage] {
        &self.messages[method as usize]
    }

    /// Every method with its (possibly empty) message list.
    pub fn iter(&self) -> impl Iterator<Item = (RequestMethod, &[ResponseMessage])> {
        RequestMethod::ALL
            .into_iter()
            .map(move |method| (method, self.get(method)))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(Vec::is_empty)
    }
}

impl From<&GlobalResponseMessage> for ResponseMessageTable {
    fn from(table: &GlobalResponseMessage) -> Self {
        let project = |bodies: &[GlobalResponseMessageBody]| -> Vec<ResponseMessage> {
            bodies.iter().map(ResponseMessage::from).collect()
        };

        // Same order as `RequestMethod::ALL`.
        Self {
            messages: [
                project(&table.post),
                project(&table.get),
                project(&table.put),
                project(&table.patch),
                project(&table.delete),
                project(&table.head),
                project(&table.options),
                project(&table.trace),
            ],
        }
    }
}
