//! End-to-end routing behaviour through `App::test`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tessera::{handler, App, Context, ServerError};

mod common;

use common::{body_to_string, request};

#[tokio::test]
async fn test_root() {
    let mut app = App::new();
    app.get("/", |c: &mut Context| {
        c.send_string("Hello, World 👋!");
    });

    let res = app.test(request("GET", "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "Hello, World 👋!");
}

#[tokio::test]
async fn test_literal_path_and_trailing_slash() {
    let mut app = App::new();
    app.get("/a/b/c", |c: &mut Context| {
        c.send_string("abc");
    });

    for path in ["/a/b/c", "/a/b/c/"] {
        let res = app.test(request("GET", path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert_eq!(body_to_string(res).await, "abc");
    }
}

#[tokio::test]
async fn test_not_found() {
    let mut app = App::new();
    app.get("/", |c: &mut Context| {
        c.send_string("Hello, World 👋!");
    });

    let res = app.test(request("POST", "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_string(res).await, "Not Found");

    let res = app.test(request("GET", "/unknown")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_string(res).await, "Not Found");
}

#[tokio::test]
async fn test_unsupported_method_is_not_found() {
    let mut app = App::new();
    app.use_middleware(|c: &mut Context| {
        c.send_string("everything");
    });

    let res = app.test(request("PROPFIND", "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_string(res).await, "Not Found");
}

#[tokio::test]
async fn test_params() {
    let mut app = App::new();
    app.get("/test", |c: &mut Context| {
        c.status(400).send_string("Should move on");
    });
    app.get("/test/:param", |c: &mut Context| {
        c.status(400).send_string("Should move on");
    });
    app.get("/test/:param/test", |c: &mut Context| {
        c.status(400).send_string("Should move on");
    });
    app.get("/test/:param/test/:param2", |c: &mut Context| {
        let body = format!("Good job {} and {}", c.params("param"), c.params("param2"));
        c.status(200).send_string(body);
    });

    let res = app.test(request("GET", "/test/john/test/doe")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "Good job john and doe");
}

#[tokio::test]
async fn test_first_registered_route_wins() {
    let mut app = App::new();
    app.get("/users/:id", |c: &mut Context| {
        c.send_string("by id");
    });
    app.get("/users/me", |c: &mut Context| {
        c.send_string("me");
    });

    let res = app.test(request("GET", "/users/me")).await.unwrap();
    assert_eq!(body_to_string(res).await, "by id");
}

#[tokio::test]
async fn test_query() {
    let mut app = App::new();
    app.get("/test", |c: &mut Context| {
        let body = format!("Hello {}", c.query("name", "default"));
        c.status(200).send_string(body);
    });

    let res = app.test(request("GET", "/test?name=john")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "Hello john");

    let res = app.test(request("GET", "/test")).await.unwrap();
    assert_eq!(body_to_string(res).await, "Hello default");
}

#[tokio::test]
async fn test_form_value() {
    let mut app = App::new();
    app.post("/submit", |c: &mut Context| {
        let body = format!("{}/{}", c.form_value("name", "none"), c.form_value("age", "?"));
        c.send_string(body);
    });

    let res = app
        .test(common::form_post("/submit", "name=jane+doe"))
        .await
        .unwrap();
    assert_eq!(body_to_string(res).await, "jane doe/?");
}

#[tokio::test]
async fn test_handlers() {
    let mut app = App::new();
    app.use_middleware(|c: &mut Context| {
        c.write("1");
        c.next();
    });
    app.get(
        "/test",
        (
            |c: &mut Context| {
                c.write("2");
                c.next();
            },
            |c: &mut Context| {
                c.write("3");
                c.next();
            },
            |c: &mut Context| {
                c.status(200);
                c.write("4");
            },
        ),
    );

    let res = app.test(request("GET", "/test")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "1234");
}

#[tokio::test]
async fn test_middleware_registered_late_runs_late() {
    let mut app = App::new();
    app.get("/x", |c: &mut Context| {
        c.write("route");
        c.next();
    });
    app.use_middleware(|c: &mut Context| {
        c.write("+mw");
    });

    let res = app.test(request("GET", "/x")).await.unwrap();
    assert_eq!(body_to_string(res).await, "route+mw");
}

#[tokio::test]
async fn test_code_after_next_runs_on_the_way_back() {
    let mut app = App::new();
    app.use_middleware(|c: &mut Context| {
        c.write("<");
        c.next();
        c.write(">");
    });
    app.get("/", |c: &mut Context| {
        c.write("body");
    });

    let res = app.test(request("GET", "/")).await.unwrap();
    assert_eq!(body_to_string(res).await, "<body>");
}

#[tokio::test]
async fn test_next_past_last_route_is_not_found() {
    let mut app = App::new();
    app.get("/", |c: &mut Context| {
        c.write("ignored");
        c.next();
    });

    let res = app.test(request("GET", "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_string(res).await, "Not Found");
}

#[tokio::test]
async fn test_group() {
    let mut app = App::new();
    {
        let mut group = app.group("/test", |c: &mut Context| {
            c.write("1");
            c.next();
        });
        let mut group = group.group("/v1", |c: &mut Context| {
            c.write("2");
            c.next();
        });
        group.get("/", |c: &mut Context| {
            c.write("3");
            c.status(200);
        });
    }

    let res = app.test(request("GET", "/test/v1/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "123");
}

#[tokio::test]
async fn test_bare_group_prefix_composition() {
    let mut app = App::new();
    {
        let mut group = app.group("/test", ());
        let mut group = group.group("/v1", ());
        group.get("/", |c: &mut Context| {
            c.send_string("v1 root");
        });
    }

    for path in ["/test/v1", "/test/v1/"] {
        let res = app.test(request("GET", path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert_eq!(body_to_string(res).await, "v1 root");
    }

    // Nothing was registered for the bare prefixes themselves.
    let res = app.test(request("GET", "/test")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_middleware_scoped_to_prefix() {
    let mut app = App::new();
    {
        let mut admin = app.group("/admin", |c: &mut Context| {
            c.status(401).send_string("denied");
        });
        admin.get("/panel", |c: &mut Context| {
            c.send_string("panel");
        });
    }
    app.get("/public", |c: &mut Context| {
        c.send_string("public");
    });

    let res = app.test(request("GET", "/admin/panel")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_string(res).await, "denied");

    let res = app.test(request("GET", "/public")).await.unwrap();
    assert_eq!(body_to_string(res).await, "public");
}

#[tokio::test]
async fn test_middleware_prefix_is_not_segment_aware() {
    let mut app = App::new();
    let _ = app.group("/te", |c: &mut Context| {
        c.write("mw:");
        c.next();
    });
    app.get("/test", |c: &mut Context| {
        c.write("test");
    });

    let res = app.test(request("GET", "/test")).await.unwrap();
    assert_eq!(body_to_string(res).await, "mw:test");
}

#[tokio::test]
async fn test_param_middleware_sees_its_params() {
    let mut app = App::new();
    let _ = app.group("/org/:org", |c: &mut Context| {
        let org = c.params("org").to_string();
        c.write(format!("[{org}]"));
        c.next();
    });
    app.get("/org/:org/repos/:repo", |c: &mut Context| {
        let body = format!("{}/{}", c.params("org"), c.params("repo"));
        c.write(body);
    });

    let res = app.test(request("GET", "/org/acme/repos/tessera")).await.unwrap();
    assert_eq!(body_to_string(res).await, "[acme]acme/tessera");
}

#[tokio::test]
async fn test_contexts_do_not_leak_params() {
    let mut app = App::new();
    app.get("/user/:name", |c: &mut Context| {
        let name = c.params("name").to_string();
        c.send_string(name);
    });
    app.get("/anon", |c: &mut Context| {
        let body = format!("[{}]", c.params("name"));
        c.send_string(body);
    });

    let res = app.test(request("GET", "/user/alice")).await.unwrap();
    assert_eq!(body_to_string(res).await, "alice");

    let res = app.test(request("GET", "/anon")).await.unwrap();
    assert_eq!(body_to_string(res).await, "[]");
}

#[tokio::test]
async fn test_handler_panic_is_internal_error() {
    let mut app = App::new();
    app.get("/boom", |_: &mut Context| panic!("handler failure"));
    app.get("/ok", |c: &mut Context| {
        c.send_string("ok");
    });

    let res = app.test(request("GET", "/boom")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = app.test(request("GET", "/ok")).await.unwrap();
    assert_eq!(body_to_string(res).await, "ok");
}

#[tokio::test]
async fn test_slow_handler_times_out() {
    let mut app = App::new();
    app.get("/slow", |c: &mut Context| {
        std::thread::sleep(Duration::from_millis(300));
        c.send_string("late");
    });

    let err = app
        .test_with_timeout(request("GET", "/slow"), Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Timeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn test_shared_state_in_handlers() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let mut app = App::new();
    app.get(
        "/count",
        vec![
            handler(move |c| {
                counter.fetch_add(1, Ordering::SeqCst);
                c.next();
            }),
            handler(|c| {
                c.send_string("counted");
            }),
        ],
    );

    for _ in 0..3 {
        let res = app.test(request("GET", "/count")).await.unwrap();
        assert_eq!(body_to_string(res).await, "counted");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_head_and_patch_routes() {
    let mut app = App::new();
    app.patch("/item/:id", |c: &mut Context| {
        let body = format!("patched {}", c.params("id"));
        c.send_string(body);
    });
    app.head("/item/:id", |c: &mut Context| {
        c.status(204);
    });

    let res = app.test(request("PATCH", "/item/9")).await.unwrap();
    assert_eq!(body_to_string(res).await, "patched 9");

    let res = app.test(request("HEAD", "/item/9")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let mut app = App::new();
    app.get("/", |c: &mut Context| {
        c.send_string("hi");
    });

    let res = app.test(request("GET", "/")).await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn test_percent_encoded_params_are_decoded() {
    let mut app = App::new();
    app.get("/greet/:who", |c: &mut Context| {
        let who = c.params("who").to_string();
        c.send_string(who);
    });

    let res = app.test(request("GET", "/greet/zo%C3%AB")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "zoë");
}

#[tokio::test]
async fn test_repeated_slashes_match_literal_route() {
    let mut app = App::new();
    app.get("/a/b/c", |c: &mut Context| {
        c.send_string("abc");
    });

    for path in ["/a//b/c", "/a/b//c//", "/a/%62/c"] {
        let res = app.test(request("GET", path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert_eq!(body_to_string(res).await, "abc");
    }
}

#[tokio::test]
async fn test_long_middleware_chain() {
    let mut app = App::new();
    for _ in 0..256 {
        app.use_middleware(|c: &mut Context| c.next());
    }
    app.get("/", |c: &mut Context| {
        c.send_string("ok");
    });

    let res = app.test(request("GET", "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_to_string(res).await, "ok");
}

#[tokio::test]
async fn test_write_all_in_handler_chain() {
    let mut app = App::new();
    app.get("/parts", |c: &mut Context| {
        c.status(200).write_all(["Hello", ", ", "World"]);
    });

    let res = app.test(request("GET", "/parts")).await.unwrap();
    assert_eq!(body_to_string(res).await, "Hello, World");
}
