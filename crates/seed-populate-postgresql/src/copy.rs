//! COPY statements and text-format encoding of generated rows.
//!
//! Rows are written in PostgreSQL's COPY text format: tab-separated fields,
//! newline-terminated rows, with backslash escapes for characters that would
//! otherwise be read as delimiters.

use bytes::{BufMut, Bytes, BytesMut};
use seed_generator::{PostRecord, UserRecord};

/// Bulk-load channel for the `users` table.
pub const USERS_COPY_STATEMENT: &str =
    "COPY users (id, name, email, password, phoneNumber, state) FROM STDIN WITH DELIMITER E'\\t'";

/// Bulk-load channel for the `posts` table.
pub const POSTS_COPY_STATEMENT: &str =
    "COPY posts (user_id, name, description, date, numberoflike) FROM STDIN WITH DELIMITER E'\\t'";

// Rough per-row sizes used to presize buffers.
const USER_ROW_HINT: usize = 120;
const POST_ROW_HINT: usize = 110;

/// Encode users in `users` column order.
pub fn encode_users(users: &[UserRecord]) -> Bytes {
    let mut buf = BytesMut::with_capacity(users.len() * USER_ROW_HINT);
    for user in users {
        let id = user.id.to_string();
        write_row(
            &mut buf,
            &[
                &id,
                &user.name,
                &user.email,
                &user.password,
                &user.phone_number,
                user.state.as_str(),
            ],
        );
    }
    buf.freeze()
}

/// Encode posts in `posts` column order.
pub fn encode_posts(posts: &[PostRecord]) -> Bytes {
    let mut buf = BytesMut::with_capacity(posts.len() * POST_ROW_HINT);
    for post in posts {
        let user_id = post.user_id.to_string();
        let date = post.iso_date();
        let likes = post.number_of_likes.to_string();
        write_row(
            &mut buf,
            &[&user_id, &post.name, &post.description, &date, &likes],
        );
    }
    buf.freeze()
}

fn write_row(buf: &mut BytesMut, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.put_u8(b'\t');
        }
        escape_into(buf, field);
    }
    buf.put_u8(b'\n');
}

fn escape_into(buf: &mut BytesMut, field: &str) {
    for byte in field.bytes() {
        match byte {
            b'\\' => buf.put_slice(b"\\\\"),
            b'\t' => buf.put_slice(b"\\t"),
            b'\n' => buf.put_slice(b"\\n"),
            b'\r' => buf.put_slice(b"\\r"),
            _ => buf.put_u8(byte),
        }
    }
}
