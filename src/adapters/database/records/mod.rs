mod user;

pub(crate) use user::UserRecord;
