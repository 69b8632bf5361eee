//! Test helpers.

use actix_web::web::Data;
use buildhook_config::{Config, DispatchDriver};
use buildhook_core::use_cases::changes::DispatchTarget;
use buildhook_dispatch_interface::{Credentials, MockControllerService};

use crate::AppContext;

pub(crate) fn test_config() -> Config {
    let mut config = Config::from_env_no_version().unwrap();
    config.dispatch.driver = DispatchDriver::Null;
    config.dispatch.master_address = "controller.test:9989".into();
    config.server.payload_field = "payload".into();
    config
}

pub(crate) fn test_context(service: MockControllerService) -> Data<AppContext> {
    let config = test_config();
    let dispatch_target = DispatchTarget {
        address: config.dispatch.master_address.parse().unwrap(),
        credentials: Credentials::new("change", "changepw"),
    };

    Data::new(AppContext::new_with_adapters(
        config,
        Box::new(service),
        dispatch_target,
    ))
}

pub(crate) const PUSH_EVENT_DATA: &str = r#"{
    "ref": "refs/heads/master",
    "before": "5aef35982fb2d34e9d9d4502f6ede1072793222d",
    "after": "41a212ee83ca127e3c8cf465891ab7216a705f59",
    "repository": {
        "name": "github",
        "url": "http://github.com/defunkt/github",
        "private": false,
        "owner": {"name": "defunkt", "email": "chris@ozmm.org"}
    },
    "commits": [
        {
            "id": "de8251ff97ee194a289832576287d6f8ad74e3d0",
            "url": "http://github.com/defunkt/github/commit/de8251ff97ee194a289832576287d6f8ad74e3d0",
            "message": "update pricing a tad",
            "timestamp": "2008-02-15T14:36:34-08:00",
            "author": {"name": "Chris Wanstrath", "email": "chris@ozmm.org"},
            "added": [],
            "modified": ["modfile"],
            "removed": ["removedFile"]
        },
        {
            "id": "41a212ee83ca127e3c8cf465891ab7216a705f59",
            "url": "http://github.com/defunkt/github/commit/41a212ee83ca127e3c8cf465891ab7216a705f59",
            "message": "okay i give in",
            "timestamp": "2008-02-15T14:57:17-08:00",
            "author": {"name": "Chris Wanstrath", "email": "chris@ozmm.org"},
            "added": ["filepath.rb"],
            "modified": [],
            "removed": []
        }
    ]
}"#;
