use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StartArgs;
use crate::store::{create_user, find_user, open_read_write, record_visit};
use crate::util::write_json_stdout;

pub fn run(args: StartArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    let connection = open_read_write(&db_path)?;

    let existing = match args.user_id {
        Some(user_id) => {
            let found = find_user(&connection, user_id)?;
            if found.is_none() {
                warn!(user_id, "unknown user id; creating a new user");
            }
            found
        }
        None => None,
    };

    let user = match existing {
        Some(user) => user,
        None => {
            let user = create_user(&connection)?;
            info!(user_id = user.user_id, test_group = %user.test_group, "created user");
            user
        }
    };

    record_visit(&connection, user.user_id, "/api/start")?;
    write_json_stdout(&user)
}
