use soapenv::{
    Auth, CommonResponse, ConcreteResponse, Content, Decoder, Envelope, Fault, FaultNamespace,
    Name, Person, ProcessARequest, ProcessAResponse, ProcessBResponse, SoapError, decode,
    decode_into, encode,
};

/// Encodes `content`, decodes it back into a placeholder of the same type.
fn roundtrip(content: Content, indent: &str) -> Content {
    let xml = encode(&Envelope::new(content.clone()), indent).unwrap();
    let placeholder = Content::placeholder_for(&content.name()).unwrap();
    let decoded = decode(&xml, Envelope::expecting(placeholder)).unwrap();
    assert!(decoded.body.fault.is_none());
    decoded.body.content.unwrap()
}

fn process_a() -> ProcessAResponse {
    ProcessAResponse {
        common: CommonResponse::new("200", "success"),
        id: "100".into(),
        process: "ProcessAResponse".into(),
    }
}

#[test]
fn test_scenario_a_process_a_response() {
    let xml = encode(&Envelope::new(process_a()), "  ").unwrap();
    let text = String::from_utf8(xml.clone()).unwrap();
    assert!(text.contains(r#"<ProcessAResponse xmlns="http://example.com/ns">"#));

    let decoded = decode(&xml, Envelope::expecting(ProcessAResponse::default())).unwrap();
    let response: ProcessAResponse = decoded.into_content().unwrap();

    assert_eq!(response.common.code, "200");
    assert_eq!(response.common.detail, "success");
    assert_eq!(response.id, "100");
    assert_eq!(response.process, "ProcessAResponse");
}

#[test]
fn test_scenario_b_fault() {
    let xml = br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope">
  <Body>
    <Fault xmlns="http://schemas.xmlsoap.org/soap/envelope/"><faultcode>Server</faultcode><faultstring>boom</faultstring></Fault>
  </Body>
</Envelope>"#;

    let decoded = decode(xml, Envelope::expecting(ProcessAResponse::default())).unwrap();

    let fault = decoded.body.fault.unwrap();
    assert_eq!(fault.code, "Server");
    assert_eq!(fault.string, "boom");
    assert!(fault.actor.is_empty());
    assert!(decoded.body.content.is_none());
}

#[test]
fn test_roundtrip_every_registered_payload() {
    let values: Vec<Content> = vec![
        Name {
            first: "Ada".into(),
            last: "Lovelace".into(),
        }
        .into(),
        Auth {
            user_id: "admin".into(),
            pass: String::new(),
        }
        .into(),
        Person {
            id: -4,
            name: Some(Name {
                first: "Grace".into(),
                last: String::new(),
            }),
            age: 85,
        }
        .into(),
        Person::default().into(),
        ProcessARequest {
            request_id: "a & <b>".into(),
        }
        .into(),
        ConcreteResponse {
            common: CommonResponse::new("500", ""),
            additional_message: "retry later".into(),
        }
        .into(),
        process_a().into(),
        ProcessBResponse {
            common: CommonResponse::success(),
            id: "100".into(),
            process: "ProcessBResponse".into(),
            amount: "10000".into(),
        }
        .into(),
    ];

    for value in values {
        assert_eq!(roundtrip(value.clone(), ""), value);
        assert_eq!(roundtrip(value.clone(), "    "), value);
    }
}

#[test]
fn test_fault_roundtrips_under_strict_detection() {
    let fault = Fault::new("Client", "bad request")
        .with_actor("urn:dispatcher")
        .with_detail("unknown action");
    let xml = encode(&Envelope::fault(fault.clone()), "  ").unwrap();

    let decoded = decode(&xml, Envelope::expecting(ProcessARequest::default())).unwrap();
    assert_eq!(decoded.body.fault, Some(fault));
    assert!(decoded.body.content.is_none());
}

#[test]
fn test_flattened_fields_are_siblings() {
    let response = ProcessAResponse {
        common: CommonResponse::success(),
        id: String::new(),
        process: "X".into(),
    };
    let xml = String::from_utf8(encode(&Envelope::new(response), "").unwrap()).unwrap();

    assert!(xml.contains(
        "<ProcessAResponse xmlns=\"http://example.com/ns\"><Code>200</Code><Detail>success</Detail><Id></Id><Process>X</Process></ProcessAResponse>"
    ));
    assert!(!xml.contains("CommonResponse"));
}

#[test]
fn test_omit_empty_applies_to_common_fields_only() {
    let response = ProcessBResponse {
        amount: "1".into(),
        ..Default::default()
    };
    let xml = String::from_utf8(encode(&Envelope::new(response), "").unwrap()).unwrap();

    for absent in ["<Code>", "<Detail>"] {
        assert!(!xml.contains(absent), "{absent} in {xml}");
    }
    assert!(xml.contains("<Id></Id><Process></Process><Amount>1</Amount>"));
}

#[test]
fn test_header_placeholder_is_filled() {
    let auth = Auth {
        user_id: "u".into(),
        pass: "p".into(),
    };
    let xml = encode(
        &Envelope::new(ProcessARequest {
            request_id: "1".into(),
        })
        .with_header(auth.clone()),
        "",
    )
    .unwrap();

    let decoded = decode(
        &xml,
        Envelope::expecting(ProcessARequest::default()).with_header(Auth::default()),
    )
    .unwrap();
    assert_eq!(decoded.header_content(), Some(&Content::Auth(auth)));

    // Without a header placeholder the header is skipped.
    let decoded = decode(&xml, Envelope::expecting(ProcessARequest::default())).unwrap();
    assert!(decoded.header.is_none());
}

#[test]
fn test_unknown_header_entries_are_skipped() {
    let xml = br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope">
  <Header>
    <Trace xmlns="urn:trace"><Id>1</Id></Trace>
    <Auth xmlns="http://example.com/ns"><UserID>u</UserID><Pass>p</Pass></Auth>
  </Header>
  <Body><ProcessARequest xmlns="http://example.com/ns"><RequestId>9</RequestId></ProcessARequest></Body>
</Envelope>"#;

    let mut envelope = Envelope::expecting(ProcessARequest::default()).with_header(Auth::default());
    decode_into(xml, &mut envelope).unwrap();

    let auth: Auth = envelope
        .header
        .and_then(|h| h.content)
        .and_then(|c| c.try_into().ok())
        .unwrap();
    assert_eq!(auth.pass, "p");
    assert_eq!(
        envelope.body.content,
        Some(Content::ProcessARequest(ProcessARequest {
            request_id: "9".into()
        }))
    );
}

#[test]
fn test_prefixed_envelope_is_accepted() {
    let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope" xmlns:ns="http://example.com/ns">
  <soap:Body>
    <ns:ProcessARequest><RequestId>42</RequestId></ns:ProcessARequest>
  </soap:Body>
</soap:Envelope>"#;

    let decoded = decode(xml, Envelope::expecting(ProcessARequest::default())).unwrap();
    let request: ProcessARequest = decoded.into_content().unwrap();
    assert_eq!(request.request_id, "42");
}

#[test]
fn test_slashless_fault_depends_on_policy() {
    let xml = br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"><Body><Fault><faultcode>Server</faultcode></Fault></Body></Envelope>"#;

    // Strict: the element is an ordinary payload and does not match the placeholder.
    let err = decode(xml, Envelope::expecting(ProcessAResponse::default())).unwrap_err();
    assert!(matches!(err, SoapError::Decode(_)), "got {err:?}");

    let decoded = Decoder::new()
        .fault_namespace(FaultNamespace::Lenient)
        .decode(xml, Envelope::expecting(ProcessAResponse::default()))
        .unwrap();
    assert_eq!(decoded.body.fault.unwrap().code, "Server");
    assert!(decoded.body.content.is_none());
}

#[test]
fn test_multiple_body_children_are_rejected() {
    let xml = br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"><Body>
<ProcessARequest xmlns="http://example.com/ns"><RequestId>1</RequestId></ProcessARequest>
<ProcessARequest xmlns="http://example.com/ns"><RequestId>2</RequestId></ProcessARequest>
</Body></Envelope>"#;

    let err = decode(xml, Envelope::expecting(ProcessARequest::default())).unwrap_err();
    assert!(matches!(err, SoapError::Protocol(_)), "got {err:?}");
}

#[test]
fn test_structural_errors() {
    let placeholder = || Envelope::expecting(ProcessARequest::default());

    let err = decode(b"<Other/>", placeholder()).unwrap_err();
    assert!(matches!(err, SoapError::Decode(_)), "got {err:?}");

    let err = decode(
        br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"></Envelope>"#,
        placeholder(),
    )
    .unwrap_err();
    assert!(matches!(err, SoapError::Protocol(ref m) if m == "missing body"), "got {err:?}");

    let err = decode(
        br#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"><Body>"#,
        placeholder(),
    )
    .unwrap_err();
    assert!(
        matches!(err, SoapError::Protocol(_) | SoapError::Xml(_)),
        "got {err:?}"
    );

    let err = decode(b"", placeholder()).unwrap_err();
    assert!(matches!(err, SoapError::Protocol(_)), "got {err:?}");
}

#[test]
fn test_unset_destination_is_reported() {
    let xml = encode(&Envelope::new(process_a()), "").unwrap();
    let err = decode(&xml, Envelope::default()).unwrap_err();
    assert!(matches!(err, SoapError::UnsetDestination));
}
